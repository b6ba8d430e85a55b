//! Tracing setup: structured logging with span definitions and event types.

pub mod events;
pub mod spans;

use std::sync::Once;

use lodestar_core::config::ObservabilityConfig;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured filter.
pub const LOG_ENV: &str = "LODESTAR_LOG";

static INIT: Once = Once::new();

/// Install the global subscriber once per process.
///
/// Respects `LODESTAR_LOG`; otherwise logs every Lodestar crate at
/// `config.log_level`. Later calls are no-ops.
pub fn init_tracing(config: &ObservabilityConfig) {
    let fallback = format!("lodestar={}", config.log_level);
    let json = config.json;
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(&fallback));
        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true);
        // A subscriber installed by the host application wins.
        let _ = if json {
            builder
                .with_file(true)
                .with_line_number(true)
                .json()
                .try_init()
        } else {
            builder.try_init()
        };
    });
}

/// Initialize tracing with a custom filter string (for testing or embedding).
pub fn init_tracing_with_filter(filter: &str) {
    let filter = EnvFilter::new(filter);
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_test_writer()
            .try_init();
    });
}
