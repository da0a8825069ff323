//! Configuration validation.
//!
//! Serde handles syntax; this module checks value ranges and addresses.
//! All problems are reported at once, not just the first.

use std::fmt;
use std::net::SocketAddr;

use crate::config::schema::DomainMonitorConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Validate a parsed configuration.
pub fn validate_config(config: &DomainMonitorConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    let checker = &config.checker;
    if checker.interval_secs == 0 {
        errors.push(ValidationError::new("checker.interval_secs", "must be greater than 0"));
    }
    if checker.timeout_secs == 0 {
        errors.push(ValidationError::new("checker.timeout_secs", "must be greater than 0"));
    }
    if checker.max_concurrency == Some(0) {
        errors.push(ValidationError::new("checker.max_concurrency", "must be greater than 0 when set"));
    }
    if !matches!(checker.scheme.as_str(), "http" | "https") {
        errors.push(ValidationError::new(
            "checker.scheme",
            format!("unsupported scheme '{}'", checker.scheme),
        ));
    }
    if checker.domains_path.as_os_str().is_empty() {
        errors.push(ValidationError::new("checker.domains_path", "must not be empty"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    let obs = &config.observability;
    if obs.metrics_enabled && obs.metrics_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", obs.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&DomainMonitorConfig::default()).is_ok());
    }

    #[test]
    fn test_reports_all_errors() {
        let mut config = DomainMonitorConfig::default();
        config.listener.bind_address = "not-an-addr".into();
        config.checker.interval_secs = 0;
        config.checker.timeout_secs = 0;
        config.checker.max_concurrency = Some(0);
        config.checker.scheme = "ftp".into();

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![
                "listener.bind_address",
                "checker.interval_secs",
                "checker.timeout_secs",
                "checker.max_concurrency",
                "checker.scheme",
            ]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = DomainMonitorConfig::default();
        config.observability.metrics_address = "nope".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors[0].field, "observability.metrics_address");
    }
}
