//! Recording scene doubles for navigation tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use async_trait::async_trait;
use tokio::sync::Notify;
use vitrine_engine::camera::Camera;
use vitrine_engine::coords::{ColorRgba, SurfaceSize};
use vitrine_engine::draw::Frame;
use vitrine_engine::host::Container;
use vitrine_engine::surface::{RenderSurface, SharedSurface, SurfaceProvider};
use vitrine_gallery::{
    DirectorConfig, Route, RouteTable, Scene, SceneContext, SceneDirector, SceneKind, SceneLoader,
    SceneModule, SceneState,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Constructed(u32, Route),
    Started(u32),
    Stopped(u32),
    Disposed(u32),
}

/// Shared log of everything the probe scenes did.
#[derive(Clone, Default)]
pub struct Journal {
    events: Arc<Mutex<Vec<Event>>>,
    next_id: Arc<AtomicU32>,
    running: Arc<AtomicUsize>,
    max_running: Arc<AtomicUsize>,
}

impl Journal {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Scene ids constructed for `route`, in construction order.
    pub fn constructed(&self, route: Route) -> Vec<u32> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                Event::Constructed(id, r) if r == route => Some(id),
                _ => None,
            })
            .collect()
    }

    pub fn count(&self, event: &Event) -> usize {
        self.events().iter().filter(|e| *e == event).count()
    }

    pub fn running_now(&self) -> usize {
        self.running.load(Ordering::SeqCst)
    }

    pub fn max_running(&self) -> usize {
        self.max_running.load(Ordering::SeqCst)
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push(event);
    }

    fn issue_id(&self) -> u32 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn enter_running(&self) {
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_running.fetch_max(now, Ordering::SeqCst);
    }

    fn leave_running(&self) {
        self.running.fetch_sub(1, Ordering::SeqCst);
    }
}

/// How a probe route misbehaves.
#[derive(Clone, Default)]
pub struct ProbeBehavior {
    pub load_gate: Option<Arc<Notify>>,
    pub construct_gate: Option<Arc<Notify>>,
    pub fail_load: bool,
    pub fail_construct: bool,
    pub fail_start: bool,
    pub fail_stop: bool,
    pub panic_on_dispose: bool,
}

pub struct ProbeScene {
    id: u32,
    state: SceneState,
    behavior: ProbeBehavior,
    journal: Journal,
    surface: Arc<dyn RenderSurface>,
}

impl Scene for ProbeScene {
    fn kind(&self) -> SceneKind {
        SceneKind::ParticleField
    }

    fn state(&self) -> SceneState {
        self.state
    }

    fn start(&mut self) -> Result<()> {
        match self.state {
            SceneState::Disposed => bail!("probe {} is disposed", self.id),
            SceneState::Running => return Ok(()),
            SceneState::Constructed => {}
        }
        if self.behavior.fail_start {
            bail!("probe {} refused to start", self.id);
        }
        self.state = SceneState::Running;
        self.journal.enter_running();
        self.journal.record(Event::Started(self.id));
        self.surface
            .draw(Frame::new(ColorRgba::black(), Camera::default()));
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.journal.record(Event::Stopped(self.id));
        if self.state == SceneState::Running {
            self.state = SceneState::Constructed;
            self.journal.leave_running();
        }
        if self.behavior.fail_stop {
            bail!("probe {} failed to stop cleanly", self.id);
        }
        Ok(())
    }

    fn dispose(&mut self) -> Result<()> {
        self.journal.record(Event::Disposed(self.id));
        if self.state == SceneState::Disposed {
            return Ok(());
        }
        if self.state == SceneState::Running {
            self.journal.leave_running();
        }
        self.state = SceneState::Disposed;
        if self.behavior.panic_on_dispose {
            panic!("probe {} exploded while disposing", self.id);
        }
        Ok(())
    }
}

pub struct ProbeModule {
    route: Route,
    behavior: ProbeBehavior,
    journal: Journal,
}

#[async_trait]
impl SceneModule for ProbeModule {
    fn kind(&self) -> SceneKind {
        self.route.kind()
    }

    async fn create_scene(&self, ctx: SceneContext) -> Result<Box<dyn Scene>> {
        if let Some(gate) = &self.behavior.construct_gate {
            gate.notified().await;
        }
        tokio::task::yield_now().await;
        if self.behavior.fail_construct {
            bail!("{} probe failed to build", self.route);
        }

        let id = self.journal.issue_id();
        self.journal.record(Event::Constructed(id, self.route));
        Ok(Box::new(ProbeScene {
            id,
            state: SceneState::Constructed,
            behavior: self.behavior.clone(),
            journal: self.journal.clone(),
            surface: ctx.surface,
        }))
    }
}

pub struct ProbeLoader {
    module: Arc<ProbeModule>,
}

#[async_trait]
impl SceneLoader for ProbeLoader {
    async fn load(&self) -> Result<Arc<dyn SceneModule>> {
        if let Some(gate) = &self.module.behavior.load_gate {
            gate.notified().await;
        }
        if self.module.behavior.fail_load {
            bail!("{} module is unavailable", self.module.route);
        }
        Ok(self.module.clone())
    }
}

pub struct Harness {
    pub director: Arc<SceneDirector>,
    pub surface: Arc<SharedSurface>,
    pub container: Container,
    pub journal: Journal,
    _provider: SurfaceProvider,
}

impl Harness {
    /// Every route served by a well-behaved probe.
    pub fn new() -> Self {
        Self::with_behavior(|_| ProbeBehavior::default())
    }

    pub fn with_behavior(behavior: impl Fn(Route) -> ProbeBehavior) -> Self {
        let journal = Journal::default();
        let mut routes = RouteTable::builtin();
        for route in Route::ALL {
            let module = Arc::new(ProbeModule {
                route,
                behavior: behavior(route),
                journal: journal.clone(),
            });
            routes = routes.with_loader(route, Arc::new(ProbeLoader { module }));
        }
        Self::build(routes, journal)
    }

    /// The real built-in scenes.
    pub fn builtin() -> Self {
        Self::build(RouteTable::builtin(), Journal::default())
    }

    fn build(routes: RouteTable, journal: Journal) -> Self {
        let container = Container::new(SurfaceSize::new(640, 360));
        let provider = SurfaceProvider::new();
        let surface = provider.acquire(&container);
        let director = SceneDirector::new(
            surface.clone(),
            container.clone(),
            routes,
            DirectorConfig::default(),
        );

        Self {
            director: Arc::new(director),
            surface,
            container,
            journal,
            _provider: provider,
        }
    }
}
