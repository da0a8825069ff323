//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for the domain monitor.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DomainMonitorConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Periodic domain check settings.
    pub checker: CheckerConfig,

    /// Static asset serving.
    pub static_files: StaticFilesConfig,

    /// Timeout configuration for the API.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Domain check configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// CSV file with a header row; first column holds the domain.
    pub domains_path: PathBuf,

    /// Seconds between the start of consecutive check cycles.
    pub interval_secs: u64,

    /// Total timeout for one probe in seconds.
    pub timeout_secs: u64,

    /// URL scheme prefixed to every domain.
    pub scheme: String,

    /// User-Agent header sent with every probe.
    pub user_agent: String,

    /// Upper bound on in-flight probes per cycle (unbounded when unset).
    pub max_concurrency: Option<usize>,

    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub use_system_proxy: bool,
}

impl CheckerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            domains_path: PathBuf::from("./domains.csv"),
            interval_secs: 600,
            timeout_secs: 5,
            scheme: "https".to_string(),
            user_agent: concat!("domain-monitor/", env!("CARGO_PKG_VERSION")).to_string(),
            max_concurrency: None,
            use_system_proxy: true,
        }
    }
}

/// Static file serving at the web root.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticFilesConfig {
    /// Serve files for paths not handled by the API.
    pub enabled: bool,

    /// Directory to serve.
    pub dir: PathBuf,
}

impl Default for StaticFilesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: PathBuf::from("./public"),
        }
    }
}

/// Timeout configuration for API requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Log output format: "compact" or "json".
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "compact".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DomainMonitorConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.checker.interval(), Duration::from_secs(600));
        assert_eq!(config.checker.timeout(), Duration::from_secs(5));
        assert_eq!(config.checker.scheme, "https");
        assert!(config.checker.max_concurrency.is_none());
        assert!(config.static_files.enabled);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: DomainMonitorConfig = toml::from_str(
            r#"
            [checker]
            interval_secs = 60
            max_concurrency = 32
            "#,
        )
        .unwrap();

        assert_eq!(config.checker.interval_secs, 60);
        assert_eq!(config.checker.max_concurrency, Some(32));
        assert_eq!(config.checker.timeout_secs, 5);
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }
}
