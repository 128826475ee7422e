//! The scene contract and the machinery shared by the built-in scenes.

mod animated;
mod contract;
mod frame_loop;

pub use animated::{AnimatedScene, SceneContent};
pub use contract::{Scene, SceneContext, SceneKind, SceneModule, SceneState};
pub use frame_loop::FrameLoop;
