use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use anyhow::Result;
use tokio::sync::watch;
use vitrine_engine::host::Container;
use vitrine_engine::surface::RenderSurface;

use crate::config::DirectorConfig;
use crate::error::NavigateError;
use crate::route::{Route, RouteTable, SceneLoader};
use crate::scene::{Scene, SceneContext, SceneState};

/// Outcome of a navigation that did not fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The scene for `route` is now active and running.
    Installed { route: Route, ticket: u64 },
    /// A later navigation overtook this one; its scene (if built) was disposed unstarted.
    Superseded { route: Route, ticket: u64 },
}

impl Transition {
    pub fn route(&self) -> Route {
        match self {
            Transition::Installed { route, .. } | Transition::Superseded { route, .. } => *route,
        }
    }

    pub fn is_installed(&self) -> bool {
        matches!(self, Transition::Installed { .. })
    }
}

/// A navigation that holds its ticket but has not loaded anything yet.
///
/// Tickets are ordered by `SceneDirector::begin` calls, so callers that hand
/// the completion to another task still get "latest request wins" in the
/// order they asked.
pub struct PendingNavigation {
    route: Route,
    ticket: u64,
    loader: Arc<dyn SceneLoader>,
}

impl PendingNavigation {
    pub fn route(&self) -> Route {
        self.route
    }

    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

struct Active {
    route: Route,
    scene: Box<dyn Scene>,
}

/// Owns the single active scene and performs transitions between scenes.
///
/// Every `navigate` takes a ticket; only the holder of the latest ticket may
/// install its scene. Older transitions that finish later dispose what they
/// built. The active slot is only touched under its lock and no lock is held
/// across an await, so retiring the old scene and installing the new one
/// happen as one step with respect to other navigations.
pub struct SceneDirector {
    surface: Arc<dyn RenderSurface>,
    container: Container,
    routes: RouteTable,
    config: DirectorConfig,
    latest: AtomicU64,
    slot: Mutex<Option<Active>>,
    active_tx: watch::Sender<Option<Route>>,
}

impl SceneDirector {
    pub fn new(
        surface: Arc<dyn RenderSurface>,
        container: Container,
        routes: RouteTable,
        config: DirectorConfig,
    ) -> Self {
        let (active_tx, _) = watch::channel(None);
        Self {
            surface,
            container,
            routes,
            config,
            latest: AtomicU64::new(0),
            slot: Mutex::new(None),
            active_tx,
        }
    }

    /// Replaces the active scene with the one `token` resolves to.
    ///
    /// Load and construction failures leave the active scene untouched. The
    /// old scene's teardown never fails the transition.
    pub async fn navigate(&self, token: Option<&str>) -> Result<Transition, NavigateError> {
        let pending = self.begin(token);
        self.complete(pending).await
    }

    /// Resolves `token` and takes the next ticket, superseding every
    /// navigation begun earlier.
    pub fn begin(&self, token: Option<&str>) -> PendingNavigation {
        let (route, loader) = self.routes.resolve(token);
        let ticket = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        log::info!("navigate {token:?} -> {route} (ticket {ticket})");
        PendingNavigation {
            route,
            ticket,
            loader,
        }
    }

    /// Loads, builds and installs a navigation from `begin`.
    pub async fn complete(&self, pending: PendingNavigation) -> Result<Transition, NavigateError> {
        let PendingNavigation {
            route,
            ticket,
            loader,
        } = pending;

        let module = loader
            .load()
            .await
            .map_err(|source| NavigateError::Load { route, source })?;

        if self.is_stale(ticket) {
            log::debug!("{route} (ticket {ticket}) superseded before construction");
            return Ok(Transition::Superseded { route, ticket });
        }

        let ctx = SceneContext {
            surface: Arc::clone(&self.surface),
            container: self.container.clone(),
            pacing: self.config.pacing,
        };
        let mut scene = module
            .create_scene(ctx)
            .await
            .map_err(|source| NavigateError::Construct { route, source })?;

        let mut slot = self.lock_slot();

        if self.is_stale(ticket) {
            drop(slot);
            log::debug!("{route} (ticket {ticket}) superseded after construction; discarding");
            contain(route, "dispose", || scene.dispose());
            contain(route, "drop", move || {
                drop(scene);
                Ok(())
            });
            return Ok(Transition::Superseded { route, ticket });
        }

        if let Some(old) = slot.take() {
            log::info!("retiring {}", old.route);
            retire(old);
        }

        if let Err(source) = scene.start() {
            log::error!("{route} scene failed to start: {source:#}");
            contain(route, "dispose", || scene.dispose());
            self.active_tx.send_replace(None);
            return Err(NavigateError::Start { route, source });
        }

        *slot = Some(Active { route, scene });
        drop(slot);

        self.active_tx.send_replace(Some(route));
        log::info!("{route} active (ticket {ticket})");
        Ok(Transition::Installed { route, ticket })
    }

    /// Retires the active scene and supersedes any transition in flight.
    ///
    /// Returns `false` when no scene was active.
    pub fn shutdown(&self) -> bool {
        self.latest.fetch_add(1, Ordering::AcqRel);
        let old = self.lock_slot().take();
        let Some(old) = old else {
            return false;
        };

        log::info!("shutting down {}", old.route);
        retire(old);
        self.active_tx.send_replace(None);
        true
    }

    pub fn active_route(&self) -> Option<Route> {
        self.lock_slot().as_ref().map(|a| a.route)
    }

    pub fn active_state(&self) -> Option<SceneState> {
        self.lock_slot().as_ref().map(|a| a.scene.state())
    }

    /// Observes the active route; `None` while nothing is active.
    pub fn watch_active(&self) -> watch::Receiver<Option<Route>> {
        self.active_tx.subscribe()
    }

    pub fn surface(&self) -> &Arc<dyn RenderSurface> {
        &self.surface
    }

    fn is_stale(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::Acquire) != ticket
    }

    fn lock_slot(&self) -> MutexGuard<'_, Option<Active>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SceneDirector {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Stops then disposes a scene. Failures are logged, never propagated.
fn retire(active: Active) {
    let Active { route, mut scene } = active;
    contain(route, "stop", || scene.stop());
    contain(route, "dispose", || scene.dispose());
    contain(route, "drop", move || {
        drop(scene);
        Ok(())
    });
}

fn contain(route: Route, step: &str, f: impl FnOnce() -> Result<()>) {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => log::warn!("{step} of {route} scene failed: {err:#}"),
        Err(panic) => log::error!("{step} of {route} scene panicked: {}", panic_message(&*panic)),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
