//! Time subsystem.
//!
//! Provides frame timing without coupling to any runtime:
//! - one `FrameClock` per render loop (window presenter, scene frame task)
//! - call `tick()` once per produced frame to obtain `FrameTime`

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
