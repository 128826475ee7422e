//! Window + runtime loop.
//!
//! Owns the `winit` event loop and the single gallery window, and wires them
//! to the GPU layer and the application callbacks.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
