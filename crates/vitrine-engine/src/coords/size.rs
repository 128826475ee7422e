use super::Viewport;

/// Size of a drawing surface or host container, in logical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    #[inline]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns `false` for zero-area sizes (minimized windows, detached containers).
    #[inline]
    pub const fn is_drawable(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Width / height, or `1.0` for degenerate sizes.
    #[inline]
    pub fn aspect(self) -> f32 {
        if self.is_drawable() {
            self.width as f32 / self.height as f32
        } else {
            1.0
        }
    }

    #[inline]
    pub fn to_viewport(self) -> Viewport {
        Viewport::new(self.width as f32, self.height as f32)
    }
}
