//! API handlers. All of them read the snapshot cache and nothing else.

use std::time::UNIX_EPOCH;

use axum::{extract::State, http::Uri, Json};
use serde::{Deserialize, Serialize};

use crate::http::response::ApiError;
use crate::http::server::AppState;
use crate::monitor::DomainCheckResult;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceStatus {
    pub version: String,
    pub status: String,
    pub domains: usize,
    pub up: usize,
    /// Unix seconds of the last publish, `null` before the first check.
    pub last_updated: Option<u64>,
}

/// `GET /api/check` (and the legacy `GET /check`).
pub async fn get_check_results(State(state): State<AppState>) -> Json<Vec<DomainCheckResult>> {
    Json(state.cache.get())
}

/// `GET /api/status`.
pub async fn get_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    let snapshot = state.cache.snapshot();
    let last_updated = snapshot
        .published_at
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs());

    Json(ServiceStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        domains: snapshot.results.len(),
        up: snapshot.up_count(),
        last_updated,
    })
}

pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found(format!("no route for {}", uri.path()))
}
