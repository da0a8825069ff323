//! Periodic check cycles.
//!
//! # Responsibilities
//! - Run one cycle immediately, then one per interval
//! - Load domains, fan out, publish to the snapshot cache
//! - Skip the cycle (keeping stale data) when the source fails or is empty

use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::time::{self, MissedTickBehavior};

use crate::domains::DomainSource;
use crate::monitor::fanout::FanoutChecker;
use crate::monitor::probe::Probe;
use crate::observability::metrics;
use crate::snapshot::SnapshotCache;

/// How a single cycle ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new snapshot was published.
    Published { checked: usize, up: usize },
    /// The source returned no domains; the cache was left alone.
    Empty,
    /// The source failed to load; the cache was left alone.
    SourceFailed(String),
}

/// Drives check cycles and owns snapshot construction.
pub struct Scheduler<S, P> {
    source: Arc<S>,
    checker: FanoutChecker<P>,
    cache: Arc<SnapshotCache>,
    interval: Duration,
}

impl<S: DomainSource, P: Probe> Scheduler<S, P> {
    pub fn new(
        source: S,
        checker: FanoutChecker<P>,
        cache: Arc<SnapshotCache>,
        interval: Duration,
    ) -> Self {
        Self {
            source: Arc::new(source),
            checker,
            cache,
            interval,
        }
    }

    /// Run cycles until the process exits. Cycles never overlap: the next
    /// tick is awaited only after the previous publish completes.
    pub async fn run(self) {
        tracing::info!(interval_secs = self.interval.as_secs(), "Domain checker starting");

        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            self.run_cycle().await;
        }
    }

    /// Execute one load → check → publish cycle.
    pub async fn run_cycle(&self) -> CycleOutcome {
        let start = Instant::now();
        tracing::info!("Starting domain check");

        // File reads and CSV parsing stay off the async workers.
        let source = Arc::clone(&self.source);
        let loaded = tokio::task::spawn_blocking(move || source.load())
            .await
            .map_err(|e| e.to_string())
            .and_then(|result| result.map_err(|e| e.to_string()));

        let domains = match loaded {
            Ok(domains) => domains,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load domains, keeping previous results");
                metrics::record_cycle("source_failed");
                return CycleOutcome::SourceFailed(e);
            }
        };

        if domains.is_empty() {
            tracing::warn!("No domains to check, keeping previous results");
            metrics::record_cycle("empty");
            return CycleOutcome::Empty;
        }

        let results = self.checker.check_all(&domains).await;
        let checked = results.len();
        let up = results.iter().filter(|r| r.is_up()).count();

        self.cache.set(results);
        metrics::record_cycle("published");
        metrics::record_snapshot(checked, up);

        tracing::info!(
            checked,
            up,
            down = checked - up,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Domain check completed and cached"
        );

        CycleOutcome::Published { checked, up }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::SourceError;
    use crate::monitor::result::DomainCheckResult;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Hands out queued responses, repeating the last one.
    struct ScriptedSource {
        script: Mutex<Vec<Result<Vec<String>, ()>>>,
        loads: Arc<AtomicUsize>,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Vec<&str>, ()>>) -> Self {
            let script = script
                .into_iter()
                .rev()
                .map(|step| step.map(|d| d.into_iter().map(String::from).collect()))
                .collect();
            Self {
                script: Mutex::new(script),
                loads: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    impl DomainSource for ScriptedSource {
        fn load(&self) -> Result<Vec<String>, SourceError> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            let step = if script.len() > 1 {
                script.pop().unwrap()
            } else {
                script.last().cloned().unwrap()
            };
            step.map_err(|_| SourceError::Empty {
                path: PathBuf::from("scripted.csv"),
            })
        }
    }

    /// Everything ending in `.up` answers 200, everything else 503.
    struct SuffixProbe;

    impl Probe for SuffixProbe {
        async fn probe(&self, domain: &str) -> DomainCheckResult {
            let status = if domain.ends_with(".up") { 200 } else { 503 };
            DomainCheckResult::from_status(domain, status)
        }
    }

    fn scheduler(source: ScriptedSource, cache: Arc<SnapshotCache>) -> Scheduler<ScriptedSource, SuffixProbe> {
        Scheduler::new(
            source,
            FanoutChecker::new(SuffixProbe),
            cache,
            Duration::from_millis(50),
        )
    }

    #[tokio::test]
    async fn test_cycle_publishes_results() {
        let cache = Arc::new(SnapshotCache::new());
        let s = scheduler(ScriptedSource::new(vec![Ok(vec!["a.up", "b.down"])]), cache.clone());

        assert_eq!(s.run_cycle().await, CycleOutcome::Published { checked: 2, up: 1 });
        assert_eq!(cache.get().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_source_keeps_previous_snapshot() {
        let cache = Arc::new(SnapshotCache::new());
        let s = scheduler(
            ScriptedSource::new(vec![Ok(vec!["a.up"]), Ok(vec![])]),
            cache.clone(),
        );

        s.run_cycle().await;
        let before = cache.get();
        let published_at = cache.last_updated();

        assert_eq!(s.run_cycle().await, CycleOutcome::Empty);
        assert_eq!(cache.get(), before);
        assert_eq!(cache.last_updated(), published_at);
    }

    #[tokio::test]
    async fn test_source_error_keeps_previous_snapshot() {
        let cache = Arc::new(SnapshotCache::new());
        let s = scheduler(ScriptedSource::new(vec![Ok(vec!["a.up"]), Err(())]), cache.clone());

        s.run_cycle().await;
        let outcome = s.run_cycle().await;

        assert!(matches!(outcome, CycleOutcome::SourceFailed(ref msg) if msg.contains("no domains found")));
        assert_eq!(cache.get(), vec![DomainCheckResult::from_status("a.up", 200)]);
    }

    #[tokio::test]
    async fn test_source_error_before_first_publish_leaves_cache_empty() {
        let cache = Arc::new(SnapshotCache::new());
        let s = scheduler(ScriptedSource::new(vec![Err(())]), cache.clone());

        assert!(matches!(s.run_cycle().await, CycleOutcome::SourceFailed(_)));
        assert!(cache.get().is_empty());
        assert!(cache.last_updated().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_checks_immediately_then_every_interval() {
        let cache = Arc::new(SnapshotCache::new());
        let source = ScriptedSource::new(vec![Ok(vec!["a.up"])]);
        let loads = Arc::clone(&source.loads);
        let s = Scheduler::new(source, FanoutChecker::new(SuffixProbe), cache.clone(), Duration::from_secs(600));

        let handle = tokio::spawn(s.run());

        // First cycle runs without waiting for the interval.
        time::sleep(Duration::from_millis(10)).await;
        assert_eq!(loads.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get().len(), 1);

        time::sleep(Duration::from_secs(300)).await;
        assert_eq!(loads.load(Ordering::SeqCst), 1);

        time::sleep(Duration::from_secs(301)).await;
        assert_eq!(loads.load(Ordering::SeqCst), 2);

        handle.abort();
    }

    /// Sleeps through every probe, tracking how many cycles overlap.
    #[derive(Clone, Default)]
    struct SlowCycleProbe {
        in_flight: Arc<AtomicUsize>,
        peak: Arc<AtomicUsize>,
    }

    impl Probe for SlowCycleProbe {
        async fn probe(&self, domain: &str) -> DomainCheckResult {
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.peak.fetch_max(now, Ordering::SeqCst);
            time::sleep(Duration::from_secs(25)).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);
            DomainCheckResult::from_status(domain, 200)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_cycles_never_overlap_when_slower_than_interval() {
        let cache = Arc::new(SnapshotCache::new());
        let source = ScriptedSource::new(vec![Ok(vec!["a.up"])]);
        let loads = Arc::clone(&source.loads);
        let probe = SlowCycleProbe::default();
        let peak = Arc::clone(&probe.peak);
        let s = Scheduler::new(source, FanoutChecker::new(probe), cache.clone(), Duration::from_secs(10));

        let handle = tokio::spawn(s.run());

        // Cycles take 25s against a 10s interval: they start at 0, 25, 50, 75.
        time::sleep(Duration::from_secs(90)).await;
        assert_eq!(loads.load(Ordering::SeqCst), 4);
        assert_eq!(peak.load(Ordering::SeqCst), 1);
        assert_eq!(cache.get().len(), 1);

        handle.abort();
    }
}
