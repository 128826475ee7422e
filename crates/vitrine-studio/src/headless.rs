//! Windowless runs: scenes draw into the shared surface and nothing presents it.
//!
//! Useful for smoke-testing scene lifecycles on machines without a GPU. A run
//! ends by shutting the director down and checking that every scene resource
//! and listener was handed back.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use vitrine_engine::coords::SurfaceSize;
use vitrine_engine::host::Container;
use vitrine_engine::surface::{RenderSurface, SurfaceProvider};
use vitrine_gallery::{DirectorConfig, Route, RouteTable, SceneDirector};

#[derive(Debug, Clone)]
pub struct HeadlessOptions {
    /// Token to open first.
    pub initial: Option<String>,
    /// Visit every route after the initial one.
    pub tour: bool,
    /// Frames each route is given to render.
    pub frames: u32,
    pub size: SurfaceSize,
    pub config: DirectorConfig,
}

/// What one visited route did while it was active.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub route: Route,
    pub frames_drawn: u64,
    pub live_resources: usize,
    pub live_bytes: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    pub stops: Vec<Stop>,
    /// Resources still live after shutdown.
    pub leaked_resources: usize,
    /// Container listeners left behind by scenes after shutdown.
    pub leaked_listeners: usize,
}

pub fn run(options: HeadlessOptions) -> Result<HeadlessReport> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to build the headless runtime")?;

    let report = runtime.block_on(visit(options))?;
    for stop in &report.stops {
        log::info!(
            "{}: {} frames, {} live resources ({} bytes)",
            stop.route,
            stop.frames_drawn,
            stop.live_resources,
            stop.live_bytes
        );
    }

    ensure!(
        report.leaked_resources == 0,
        "{} scene resources outlived shutdown",
        report.leaked_resources
    );
    ensure!(
        report.leaked_listeners == 0,
        "{} container listeners outlived shutdown",
        report.leaked_listeners
    );
    Ok(report)
}

async fn visit(options: HeadlessOptions) -> Result<HeadlessReport> {
    let container = Container::new(options.size);
    let provider = SurfaceProvider::new();
    let surface = provider.acquire(&container);
    let ledger = surface.resources().clone();
    let baseline_listeners = listener_count(&container);
    let dwell = options.config.pacing.period() * options.frames.max(1);

    let director = SceneDirector::new(
        Arc::clone(&surface) as Arc<dyn RenderSurface>,
        container.clone(),
        RouteTable::builtin(),
        options.config.clone(),
    );

    let mut tokens = vec![options.initial.clone()];
    if options.tour {
        let first = Route::resolve(options.initial.as_deref());
        let mut route = first.next();
        while route != first {
            tokens.push(Some(route.token()));
            route = route.next();
        }
    }

    let mut stops = Vec::with_capacity(tokens.len());
    for token in tokens {
        let drawn_before = surface.draw_count();
        let transition = director.navigate(token.as_deref()).await?;
        tokio::time::sleep(dwell + Duration::from_millis(1)).await;

        stops.push(Stop {
            route: transition.route(),
            frames_drawn: surface.draw_count() - drawn_before,
            live_resources: ledger.live(),
            live_bytes: ledger.live_bytes(),
        });
    }

    director.shutdown();
    drop(director);

    let report = HeadlessReport {
        stops,
        leaked_resources: ledger.live(),
        leaked_listeners: listener_count(&container).saturating_sub(baseline_listeners),
    };
    provider.dispose();
    Ok(report)
}

fn listener_count(container: &Container) -> usize {
    container.resize_listener_count() + container.pointer_listener_count()
}

#[cfg(test)]
mod tests {
    use vitrine_gallery::FramePacing;

    use super::*;

    fn options(initial: Option<&str>, tour: bool) -> HeadlessOptions {
        HeadlessOptions {
            initial: initial.map(str::to_string),
            tour,
            frames: 2,
            size: SurfaceSize::new(160, 90),
            config: DirectorConfig {
                pacing: FramePacing::new(120),
            },
        }
    }

    #[test]
    fn tour_visits_every_route_and_leaks_nothing() {
        let report = run(options(Some("#/wave"), true)).unwrap();

        let routes: Vec<Route> = report.stops.iter().map(|s| s.route).collect();
        assert_eq!(
            routes,
            vec![Route::Wave, Route::Instanced, Route::Raymarch, Route::Galaxy]
        );
        assert!(report.stops.iter().all(|s| s.frames_drawn >= 1));
        assert!(report.stops.iter().all(|s| s.live_resources >= 3));
        assert_eq!(report.leaked_resources, 0);
        assert_eq!(report.leaked_listeners, 0);
    }

    #[test]
    fn unknown_initial_route_opens_the_galaxy() {
        let report = run(options(Some("#/nowhere"), false)).unwrap();

        assert_eq!(report.stops.len(), 1);
        assert_eq!(report.stops[0].route, Route::Galaxy);
    }
}
