use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::{bail, Result};
use vitrine_engine::coords::SurfaceSize;
use vitrine_engine::draw::Frame;
use vitrine_engine::host::{Container, ListenerId};
use vitrine_engine::surface::RenderSurface;
use vitrine_engine::time::{FrameClock, FrameTime};

use super::{FrameLoop, Scene, SceneContext, SceneKind, SceneState};

/// Scene-specific content driven by an `AnimatedScene`.
///
/// Content owns its geometry, materials and controls. `resize` only updates
/// presentation parameters; `release` drops everything the content allocated.
pub trait SceneContent: Send + 'static {
    fn kind(&self) -> SceneKind;

    fn resize(&mut self, size: SurfaceSize);

    /// Advances animated state by one frame.
    fn update(&mut self, time: &FrameTime);

    fn render(&self, size: SurfaceSize) -> Frame;

    fn release(&mut self);
}

struct Shared<C> {
    content: C,
    clock: FrameClock,
    state: SceneState,
}

type SharedRef<C> = Arc<Mutex<Shared<C>>>;

fn lock<C>(shared: &Mutex<Shared<C>>) -> MutexGuard<'_, Shared<C>> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Implements the scene lifecycle on top of a `SceneContent`.
///
/// Owns the frame loop and the scene's single resize listener. Dropping an
/// `AnimatedScene` disposes it.
pub struct AnimatedScene<C: SceneContent> {
    kind: SceneKind,
    shared: SharedRef<C>,
    surface: Arc<dyn RenderSurface>,
    container: Container,
    frame_loop: FrameLoop,
    resize_listener: Option<ListenerId>,
}

impl<C: SceneContent> AnimatedScene<C> {
    pub fn new(mut content: C, ctx: &SceneContext) -> Self {
        let kind = content.kind();
        content.resize(ctx.surface.current_size());

        let shared: SharedRef<C> = Arc::new(Mutex::new(Shared {
            content,
            clock: FrameClock::new(),
            state: SceneState::Constructed,
        }));

        let weak = Arc::downgrade(&shared);
        let resize_listener = ctx.container.add_resize_listener(move |size| {
            let Some(shared) = weak.upgrade() else {
                return;
            };
            let mut shared = lock(&shared);
            if shared.state != SceneState::Disposed {
                shared.content.resize(size);
            }
        });

        log::debug!("{kind} scene constructed");

        Self {
            kind,
            shared,
            surface: Arc::clone(&ctx.surface),
            container: ctx.container.clone(),
            frame_loop: FrameLoop::new(ctx.pacing),
            resize_listener: Some(resize_listener),
        }
    }

    /// Runs `f` against the content.
    pub fn with_content<R>(&self, f: impl FnOnce(&C) -> R) -> R {
        f(&lock(&self.shared).content)
    }

    fn set_state(&self, state: SceneState) {
        lock(&self.shared).state = state;
    }
}

impl<C: SceneContent> Scene for AnimatedScene<C> {
    fn kind(&self) -> SceneKind {
        self.kind
    }

    fn state(&self) -> SceneState {
        lock(&self.shared).state
    }

    fn start(&mut self) -> Result<()> {
        {
            let mut shared = lock(&self.shared);
            match shared.state {
                SceneState::Disposed => bail!("cannot start a disposed {} scene", self.kind),
                SceneState::Running => return Ok(()),
                SceneState::Constructed => {
                    shared.state = SceneState::Running;
                    shared.clock.reset();
                }
            }
        }

        let shared = Arc::clone(&self.shared);
        let surface = Arc::clone(&self.surface);
        let started = self.frame_loop.start(move || {
            let mut guard = lock(&shared);
            let shared = &mut *guard;
            if shared.state != SceneState::Running {
                return;
            }
            let time = shared.clock.tick();
            shared.content.update(&time);
            surface.draw(shared.content.render(surface.current_size()));
        });

        if let Err(err) = started {
            self.set_state(SceneState::Constructed);
            return Err(err);
        }

        log::debug!("{} scene started", self.kind);
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        {
            let mut shared = lock(&self.shared);
            if shared.state == SceneState::Running {
                shared.state = SceneState::Constructed;
            }
        }
        self.frame_loop.stop();
        Ok(())
    }

    fn dispose(&mut self) -> Result<()> {
        if self.state() == SceneState::Disposed {
            return Ok(());
        }

        self.stop()?;

        if let Some(id) = self.resize_listener.take() {
            self.container.remove_listener(id);
        }

        {
            let mut shared = lock(&self.shared);
            shared.content.release();
            shared.state = SceneState::Disposed;
        }

        log::debug!("{} scene disposed", self.kind);
        Ok(())
    }
}

impl<C: SceneContent> Drop for AnimatedScene<C> {
    fn drop(&mut self) {
        if let Err(err) = self.dispose() {
            log::warn!("disposing {} scene on drop failed: {err:#}", self.kind);
        }
    }
}
