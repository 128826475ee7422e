use crate::coords::SurfaceSize;

use super::ctx::FrameCtx;

/// Control directive returned by app callbacks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AppControl {
    Continue,
    Exit,
}

/// Application contract driven by the window runtime.
pub trait App {
    /// Window was resized; `logical` is in logical pixels.
    fn on_resize(&mut self, logical: SurfaceSize) {
        let _ = logical;
    }

    /// Called once per rendered frame, after input for the frame was queued.
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl;

    /// Window is closing; last chance to release resources.
    fn on_exit(&mut self) {}
}
