//! Structured logging.
//!
//! `RUST_LOG` wins over the configured level; `log_format = "json"` switches
//! to machine-readable output.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::ObservabilityConfig;

/// Build the env filter, falling back to `domain_monitor=<level>,tower_http=<level>`.
pub fn env_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "domain_monitor={level},tower_http={level}",
            level = config.log_level
        )
        .into()
    })
}

/// Initialize the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = env_filter(config);

    let layer = match config.log_format.as_str() {
        "json" => tracing_subscriber::fmt::layer().json().with_filter(filter).boxed(),
        _ => tracing_subscriber::fmt::layer().compact().with_filter(filter).boxed(),
    };

    tracing_subscriber::registry().with(layer).init();
}
