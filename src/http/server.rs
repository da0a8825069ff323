//! HTTP server setup.
//!
//! # Responsibilities
//! - Create the Axum router (API routes + static files)
//! - Wire up middleware (tracing, request ID, timeout, panic recovery)
//! - Serve until the shutdown signal, then drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::{any, get},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer, services::ServeDir, timeout::TimeoutLayer, trace::TraceLayer,
};

use crate::config::DomainMonitorConfig;
use crate::http::handlers::{get_check_results, get_status, not_found};
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::response::handle_panic;
use crate::snapshot::SnapshotCache;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<SnapshotCache>,
}

/// HTTP API server.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(config: &DomainMonitorConfig, cache: Arc<SnapshotCache>) -> Self {
        let state = AppState { cache };
        Self {
            router: Self::build_router(config, state),
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &DomainMonitorConfig, state: AppState) -> Router {
        let router = Router::new()
            .route("/api/check", get(get_check_results))
            .route("/check", get(get_check_results))
            .route("/api/status", get(get_status))
            .route("/api/{*rest}", any(not_found));

        let router = if config.static_files.enabled {
            router.fallback_service(ServeDir::new(&config.static_files.dir))
        } else {
            router.fallback(not_found)
        };

        router
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(CatchPanicLayer::custom(handle_panic))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The fully layered router, for in-process use.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve on `listener` until `shutdown` fires, then drain and return.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
