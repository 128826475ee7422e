use std::sync::Once;

use log::LevelFilter;

/// Crates that log every frame or every pipeline at `info`.
const NOISY_CRATES: [&str; 4] = ["wgpu_core", "wgpu_hal", "naga", "winit"];

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g.
/// "vitrine_gallery::director=debug,wgpu=warn") and wins over `RUST_LOG`.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    /// Level for everything not named by a filter.
    pub default_level: LevelFilter,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            default_level: LevelFilter::Info,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once; later calls are ignored.
///
/// Timestamps carry milliseconds so overlapping scene transitions can be told
/// apart in the log.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let mut builder = env_logger::Builder::new();
        builder.filter_level(config.default_level);
        for name in NOISY_CRATES {
            builder.filter_module(name, config.default_level.min(LevelFilter::Warn));
        }

        let explicit = config
            .env_filter
            .or_else(|| std::env::var("RUST_LOG").ok())
            .filter(|f| !f.trim().is_empty());
        if let Some(filter) = &explicit {
            builder.parse_filters(filter);
        }

        builder
            .write_style(config.write_style)
            .format_timestamp_millis();

        // A test harness or embedding host may already own the logger.
        if builder.try_init().is_err() {
            return;
        }

        log::debug!("logging initialized (filter: {explicit:?})");
    });
}
