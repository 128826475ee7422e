//! View/projection state for 3D scenes.

mod camera;

pub use camera::{Camera, Projection};
