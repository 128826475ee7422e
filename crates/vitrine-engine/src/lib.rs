//! Vitrine engine crate.
//!
//! Owns the platform and GPU runtime pieces the gallery builds on: the host
//! container scenes render into, the shared render surface and its resource
//! ledger, the draw stream, cameras, and the winit/wgpu presenter.

pub mod camera;
pub mod coords;
pub mod core;
pub mod device;
pub mod draw;
pub mod host;
pub mod input;
pub mod logging;
pub mod render;
pub mod resources;
pub mod surface;
pub mod time;
pub mod window;
