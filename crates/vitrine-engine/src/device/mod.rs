//! GPU device and window surface management.
//!
//! Responsible for:
//! - creating the wgpu Instance/Adapter/Device/Queue
//! - configuring the window surface (swapchain) and following resizes
//! - acquiring frames and mapping surface errors to runtime actions

mod gpu;
mod surface;

pub use gpu::{Gpu, GpuFrame, GpuInit};
pub use surface::SurfaceErrorAction;
