//! Outcome of a single reachability probe.

use serde::{Deserialize, Serialize};

/// Result of probing one domain.
///
/// Built only through [`DomainCheckResult::from_status`] or
/// [`DomainCheckResult::failed`], so a value either carries an HTTP status or
/// an error, never both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainCheckResult {
    domain: String,
    status_code: u16,
    is_up: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl DomainCheckResult {
    /// A response was received with the given status.
    pub fn from_status(domain: impl Into<String>, status_code: u16) -> Self {
        Self {
            domain: domain.into(),
            status_code,
            is_up: (200..400).contains(&status_code),
            error: None,
        }
    }

    /// The probe failed before any response arrived.
    pub fn failed(domain: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            status_code: 0,
            is_up: false,
            error: Some(error.into()),
        }
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// HTTP status, `0` when no response was received.
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    pub fn is_up(&self) -> bool {
        self.is_up
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}
