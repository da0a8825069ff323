//! Startup orchestration.
//!
//! Builds the checker from config and detaches the scheduler loop. The HTTP
//! listener is bound by the caller afterwards, so traffic only arrives once
//! the first cycle is already underway.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::CheckerConfig;
use crate::domains::CsvDomainSource;
use crate::monitor::{FanoutChecker, HttpProber, Scheduler};
use crate::snapshot::SnapshotCache;

/// Build the CSV-backed scheduler described by `config`.
pub fn build_scheduler(
    config: &CheckerConfig,
    cache: Arc<SnapshotCache>,
) -> Result<Scheduler<CsvDomainSource, HttpProber>, reqwest::Error> {
    let prober = HttpProber::from_config(config)?;
    let checker = FanoutChecker::new(prober).with_max_concurrency(config.max_concurrency);
    let source = CsvDomainSource::new(&config.domains_path);

    tracing::info!(
        domains_path = %config.domains_path.display(),
        timeout_secs = config.timeout_secs,
        max_concurrency = ?config.max_concurrency,
        "Domain checker configured"
    );

    Ok(Scheduler::new(source, checker, cache, config.interval()))
}

/// Spawn the scheduler loop as a detached background task.
pub fn spawn_checker(
    config: &CheckerConfig,
    cache: Arc<SnapshotCache>,
) -> Result<JoinHandle<()>, reqwest::Error> {
    let scheduler = build_scheduler(config, cache)?;
    Ok(tokio::spawn(scheduler.run()))
}
