//! Coordinate, size and color types shared by the draw stream, renderers and hosts.
//!
//! Screen space conventions:
//! - `SurfaceSize` / `Viewport` are logical pixels
//! - projected sprites live in NDC (-1..1, +Y up)
//!
//! Vector math, world-space and NDC alike, uses `glam`.

mod color;
mod size;
mod viewport;

pub use color::ColorRgba;
pub use size::SurfaceSize;
pub use viewport::Viewport;
