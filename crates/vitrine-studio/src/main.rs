use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use vitrine_engine::coords::SurfaceSize;
use vitrine_engine::device::GpuInit;
use vitrine_engine::host::Container;
use vitrine_engine::logging::{init_logging, LoggingConfig};
use vitrine_engine::surface::SurfaceProvider;
use vitrine_engine::window::{Runtime, RuntimeConfig};
use vitrine_gallery::{DirectorConfig, FramePacing, Route};

mod app;
mod headless;
mod host;

use app::GalleryApp;
use headless::HeadlessOptions;
use host::GalleryHost;

/// Gallery of animated 3D scenes.
#[derive(Debug, Parser)]
#[command(name = "vitrine", version)]
struct Cli {
    /// Route to open first, e.g. "#/wave". Unknown routes open the galaxy.
    route: Option<String>,

    /// Window width in logical pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Scene frame rate.
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Log filter in env_logger syntax; takes precedence over RUST_LOG.
    #[arg(long)]
    log: Option<String>,

    /// Run scenes without opening a window.
    #[arg(long)]
    headless: bool,

    /// With --headless, visit every route once.
    #[arg(long, requires = "headless")]
    tour: bool,

    /// With --headless, frames each route renders before moving on.
    #[arg(long, default_value_t = 120)]
    frames: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(LoggingConfig {
        env_filter: cli.log.clone(),
        ..LoggingConfig::default()
    });

    let size = SurfaceSize::new(cli.width, cli.height);
    let config = DirectorConfig {
        pacing: FramePacing::new(cli.fps),
    };

    if cli.headless {
        headless::run(HeadlessOptions {
            initial: cli.route,
            tour: cli.tour,
            frames: cli.frames,
            size,
            config,
        })?;
        return Ok(());
    }

    let container = Container::new(size);
    let provider = SurfaceProvider::new();
    let surface = provider.acquire(&container);
    let host = GalleryHost::start(Arc::clone(&surface), container.clone(), config)?;
    let initial = Route::resolve(cli.route.as_deref());
    host.navigate(cli.route);

    let app = GalleryApp::new(host, container, provider, surface, initial);
    Runtime::run(
        RuntimeConfig {
            title: "vitrine".to_string(),
            initial_size: size,
        },
        GpuInit::default(),
        app,
    )
}
