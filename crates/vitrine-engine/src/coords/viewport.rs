/// Viewport size in logical pixels, as consumed by renderers.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Converts a length in logical pixels to NDC units along each axis.
    #[inline]
    pub fn px_to_ndc(self, px: f32) -> (f32, f32) {
        (2.0 * px / self.width.max(1.0), 2.0 * px / self.height.max(1.0))
    }
}
