//! Periodic HTTPS reachability checks for a list of domains, served over a
//! small JSON API.

pub mod config;
pub mod domains;
pub mod http;
pub mod lifecycle;
pub mod monitor;
pub mod observability;
pub mod snapshot;

pub use config::DomainMonitorConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use monitor::DomainCheckResult;
pub use snapshot::SnapshotCache;
