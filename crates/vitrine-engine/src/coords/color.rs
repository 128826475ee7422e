/// Linear straight-alpha RGBA color.
///
/// Renderers premultiply on upload; scene code works with straight alpha.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct ColorRgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorRgba {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 1.0)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::new(1.0, 1.0, 1.0, 1.0)
    }

    /// Opaque color from a `0xRRGGBB` literal.
    #[inline]
    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self::rgb(channel(16), channel(8), channel(0))
    }

    /// Opaque color from hue / saturation / lightness, all in `[0, 1]`.
    ///
    /// Hue wraps, so values above 1 continue around the color wheel.
    pub fn from_hsl(h: f32, s: f32, l: f32) -> Self {
        let h = h.rem_euclid(1.0);
        let s = s.clamp(0.0, 1.0);
        let l = l.clamp(0.0, 1.0);

        if s == 0.0 {
            return Self::rgb(l, l, l);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::rgb(
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    }

    /// Component-wise linear interpolation (`t = 0` is `self`).
    #[inline]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
            self.a + (other.a - self.a) * t,
        )
    }

    /// Multiplies the color channels, leaving alpha untouched.
    #[inline]
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k, self.a)
    }

    #[inline]
    pub fn premultiplied(self) -> [f32; 4] {
        let a = self.a.clamp(0.0, 1.0);
        [self.r * a, self.g * a, self.b * a, a]
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.r.is_finite() && self.g.is_finite() && self.b.is_finite() && self.a.is_finite()
    }
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: ColorRgba, b: ColorRgba) -> bool {
        (a.r - b.r).abs() < 1e-4 && (a.g - b.g).abs() < 1e-4 && (a.b - b.b).abs() < 1e-4
    }

    #[test]
    fn hex_channels() {
        let c = ColorRgba::from_hex(0xff8000);
        assert!(close(c, ColorRgba::rgb(1.0, 128.0 / 255.0, 0.0)));
    }

    #[test]
    fn hsl_primaries() {
        assert!(close(ColorRgba::from_hsl(0.0, 1.0, 0.5), ColorRgba::rgb(1.0, 0.0, 0.0)));
        assert!(close(ColorRgba::from_hsl(1.0 / 3.0, 1.0, 0.5), ColorRgba::rgb(0.0, 1.0, 0.0)));
        assert!(close(ColorRgba::from_hsl(2.0 / 3.0, 1.0, 0.5), ColorRgba::rgb(0.0, 0.0, 1.0)));
    }

    #[test]
    fn hsl_hue_wraps() {
        assert!(close(ColorRgba::from_hsl(1.25, 0.7, 0.4), ColorRgba::from_hsl(0.25, 0.7, 0.4)));
    }

    #[test]
    fn lerp_endpoints() {
        let a = ColorRgba::black();
        let b = ColorRgba::white();
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }

    #[test]
    fn premultiply_scales_rgb() {
        let p = ColorRgba::new(1.0, 0.5, 0.25, 0.5).premultiplied();
        assert_eq!(p, [0.5, 0.25, 0.125, 0.5]);
    }
}
