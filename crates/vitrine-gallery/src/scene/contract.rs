use std::fmt;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use vitrine_engine::host::Container;
use vitrine_engine::surface::RenderSurface;

use crate::config::FramePacing;

/// The closed set of scene kinds the gallery knows how to manage.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SceneKind {
    ParticleField,
    InstancedGrid,
    ShaderPlane,
    RaymarchQuad,
}

impl fmt::Display for SceneKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SceneKind::ParticleField => "particle field",
            SceneKind::InstancedGrid => "instanced grid",
            SceneKind::ShaderPlane => "shader plane",
            SceneKind::RaymarchQuad => "raymarch quad",
        };
        f.write_str(name)
    }
}

/// Lifecycle state of a scene.
///
/// `Constructed` is inert, `Running` is drawing every frame, `Disposed` is
/// terminal. Stopping a running scene returns it to `Constructed`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SceneState {
    Constructed,
    Running,
    Disposed,
}

/// A self-contained, independently lifecycled unit of animated content.
///
/// Implementations must make `stop` and `dispose` idempotent: calling either
/// twice, or before `start`, succeeds and does nothing. `start` on a disposed
/// scene is an error.
pub trait Scene: Send {
    fn kind(&self) -> SceneKind;

    fn state(&self) -> SceneState;

    /// `Constructed -> Running`. No-op when already running.
    fn start(&mut self) -> Result<()>;

    /// `Running -> Constructed`, cancelling the pending frame.
    fn stop(&mut self) -> Result<()>;

    /// Any state to `Disposed`, releasing every resource and listener the scene holds.
    fn dispose(&mut self) -> Result<()>;
}

/// What a scene module receives when asked to build a scene.
#[derive(Clone)]
pub struct SceneContext {
    /// Shared render surface. Scenes draw into it but never own it.
    pub surface: Arc<dyn RenderSurface>,
    /// Host container, for resize and pointer listeners.
    pub container: Container,
    pub pacing: FramePacing,
}

/// Factory for one gallery entry.
#[async_trait]
pub trait SceneModule: Send + Sync {
    fn kind(&self) -> SceneKind;

    /// Builds a new scene in the `Constructed` state.
    async fn create_scene(&self, ctx: SceneContext) -> Result<Box<dyn Scene>>;
}
