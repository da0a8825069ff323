//! Concurrent fan-out over a list of domains.
//!
//! # Responsibilities
//! - Spawn one probe task per domain
//! - Join on every task before returning (no partial results)
//! - Optionally cap in-flight probes with a semaphore
//!
//! # Design Decisions
//! - Results flow through an mpsc channel sized to the domain count; the
//!   join completes when the last sender is dropped
//! - A panicking probe still yields a result for its domain

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use tokio::sync::{mpsc, Semaphore};

use crate::monitor::probe::Probe;
use crate::monitor::result::DomainCheckResult;

/// Runs a [`Probe`] against many domains at once.
pub struct FanoutChecker<P> {
    prober: Arc<P>,
    max_concurrency: Option<usize>,
}

impl<P: Probe> FanoutChecker<P> {
    pub fn new(prober: P) -> Self {
        Self {
            prober: Arc::new(prober),
            max_concurrency: None,
        }
    }

    /// Limit in-flight probes per call. `None` means one task per domain, all
    /// started at once.
    pub fn with_max_concurrency(mut self, limit: Option<usize>) -> Self {
        self.max_concurrency = limit.map(|n| n.max(1));
        self
    }

    #[cfg(test)]
    fn prober(&self) -> &P {
        &self.prober
    }

    /// Probe every domain and return one result per input, in completion order.
    ///
    /// Duplicates are probed and reported separately.
    pub async fn check_all(&self, domains: &[String]) -> Vec<DomainCheckResult> {
        if domains.is_empty() {
            return Vec::new();
        }

        let start = Instant::now();
        tracing::debug!(
            domains = domains.len(),
            max_concurrency = ?self.max_concurrency,
            "Starting fan-out"
        );

        let (tx, mut rx) = mpsc::channel(domains.len());
        let limiter = self.max_concurrency.map(|n| Arc::new(Semaphore::new(n)));

        for domain in domains {
            let tx = tx.clone();
            let prober = Arc::clone(&self.prober);
            let limiter = limiter.clone();
            let domain = domain.clone();

            tokio::spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let result = AssertUnwindSafe(prober.probe(&domain))
                    .catch_unwind()
                    .await
                    .unwrap_or_else(|_| {
                        tracing::error!(domain = %domain, "Probe panicked");
                        DomainCheckResult::failed(domain.as_str(), "probe panicked")
                    });

                // Capacity equals the task count, so this never waits.
                let _ = tx.send(result).await;
            });
        }
        drop(tx);

        let mut results = Vec::with_capacity(domains.len());
        while let Some(result) = rx.recv().await {
            results.push(result);
        }

        tracing::debug!(
            results = results.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fan-out complete"
        );
        results
    }
}
