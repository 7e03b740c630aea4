//! Logging setup
//!
//! One global `tracing-subscriber` registry for the whole service. The
//! pipeline logs each stage at info and its degradations (unparseable
//! selections, missing sheet files) at warn, so the subscriber goes up
//! before anything else runs. Debug builds print pretty terminal output
//! for local work; release builds emit JSON lines for log shippers.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global subscriber at the given level.
///
/// A `RUST_LOG` environment variable takes precedence over `level`. The
/// filter applies the level both globally and to this crate's target, so
/// engine logs stay visible even when dependencies are quieted.
pub fn init_telemetry_with_level(level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},diya_engine={level}")));

    #[cfg(debug_assertions)]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().pretty().with_target(false))
            .try_init()
            .ok();
    }

    #[cfg(not(debug_assertions))]
    {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_current_span(true))
            .try_init()
            .ok();
    }
}

/// Install the subscriber at "info" before configuration is available,
/// so config loading itself gets logged. Startup calls
/// [`init_telemetry_with_level`] again once the configured level is
/// known.
pub fn init_telemetry() {
    init_telemetry_with_level("info");
}
