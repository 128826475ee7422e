//! Contracts between the window runtime and the application.
//!
//! The runtime owns the platform loop; applications see only `App` callbacks
//! and a per-frame `FrameCtx`.

mod app;
mod ctx;

pub use app::{App, AppControl};
pub use ctx::{FrameCtx, WindowCtx};
