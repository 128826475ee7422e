use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::runtime::Runtime;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use vitrine_engine::host::Container;
use vitrine_engine::surface::SharedSurface;
use vitrine_gallery::{DirectorConfig, Route, RouteTable, SceneDirector, Transition};

/// Drives the scene director on a background runtime so the window thread
/// never blocks on scene loading or construction.
pub struct GalleryHost {
    runtime: Runtime,
    director: Arc<SceneDirector>,
}

impl GalleryHost {
    pub fn start(
        surface: Arc<SharedSurface>,
        container: Container,
        config: DirectorConfig,
    ) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("vitrine-scenes")
            .enable_time()
            .build()
            .context("failed to build the scene runtime")?;

        let director = SceneDirector::new(surface, container, RouteTable::builtin(), config);

        Ok(Self {
            runtime,
            director: Arc::new(director),
        })
    }

    /// Requests a transition and returns immediately; the outcome is logged.
    ///
    /// The ticket is taken here, on the caller's thread, so requests win in
    /// the order they were made whichever worker finishes first.
    pub fn navigate(&self, token: Option<String>) -> JoinHandle<()> {
        let pending = self.director.begin(token.as_deref());
        let director = Arc::clone(&self.director);
        self.runtime.spawn(async move {
            match director.complete(pending).await {
                Ok(Transition::Installed { .. }) => {}
                Ok(Transition::Superseded { route, ticket }) => {
                    log::debug!("navigation to {route} (ticket {ticket}) was overtaken");
                }
                Err(err) => {
                    log::error!("{:#}", anyhow::Error::from(err));
                }
            }
        })
    }

    pub fn watch_active(&self) -> watch::Receiver<Option<Route>> {
        self.director.watch_active()
    }

    /// Retires the active scene. Transitions still in flight are superseded.
    pub fn shutdown(&self) {
        self.director.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use vitrine_engine::coords::SurfaceSize;

    use super::*;

    #[test]
    fn later_request_wins_on_the_scene_runtime() {
        let container = Container::new(SurfaceSize::new(160, 90));
        let surface = Arc::new(SharedSurface::new(container.size()));
        let host = GalleryHost::start(surface, container, DirectorConfig::default()).unwrap();

        for _ in 0..10 {
            let wave = host.navigate(Some(Route::Wave.token()));
            let instanced = host.navigate(Some(Route::Instanced.token()));
            host.runtime.block_on(async {
                wave.await.unwrap();
                instanced.await.unwrap();
            });
            assert_eq!(host.director.active_route(), Some(Route::Instanced));
        }

        host.shutdown();
        assert_eq!(host.director.active_route(), None);
    }
}
