//! The built-in gallery scenes.
//!
//! Each scene is a `SceneContent` wrapped in an `AnimatedScene`, built by a
//! zero-sized `SceneModule`. Construction yields to the runtime between the
//! expensive steps so building a scene never monopolizes the host thread.

mod galaxy;
mod instanced;
mod raymarch;
mod wave;

use std::sync::Arc;

pub use galaxy::{GalaxyModule, GalaxyParams};
pub use instanced::{InstancedModule, InstancedParams};
pub use raymarch::{RaymarchModule, RaymarchParams};
pub use wave::{WaveModule, WaveParams};

use crate::scene::{SceneKind, SceneModule};

/// The built-in module for a scene kind.
pub fn builtin_module(kind: SceneKind) -> Arc<dyn SceneModule> {
    match kind {
        SceneKind::ParticleField => Arc::new(GalaxyModule::default()),
        SceneKind::ShaderPlane => Arc::new(WaveModule::default()),
        SceneKind::InstancedGrid => Arc::new(InstancedModule::default()),
        SceneKind::RaymarchQuad => Arc::new(RaymarchModule::default()),
    }
}
