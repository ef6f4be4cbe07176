//! Structured logging with tracing
//!
//! Sets up console logging with a level filter from RUST_LOG and an
//! optional JSON output format for log shippers.

use super::config::{LogFormat, MonitoringConfig};
use tracing_subscriber::{
    fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Initialize tracing subscriber. Safe to call more than once; later calls
/// are no-ops because a global subscriber is already installed.
pub fn init_tracing(config: &MonitoringConfig) {
    if !config.enabled {
        return;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match config.log_format {
        LogFormat::Json => {
            let _ = registry
                .with(fmt::layer().with_target(true).json())
                .try_init();
        }
        LogFormat::Text => {
            let _ = registry.with(fmt::layer().with_target(true)).try_init();
        }
    }
}
