//! Latest published check results.

use std::sync::Arc;
use std::time::SystemTime;

use arc_swap::ArcSwap;

use crate::monitor::result::DomainCheckResult;

/// One complete cycle's results.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    pub results: Vec<DomainCheckResult>,
    /// `None` only for the initial empty snapshot.
    pub published_at: Option<SystemTime>,
}

impl Snapshot {
    pub fn up_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_up()).count()
    }
}

/// Single-writer, many-reader holder of the current [`Snapshot`].
///
/// Publishing swaps an `Arc` pointer, so readers never wait on a writer and
/// always see one whole snapshot.
#[derive(Debug, Default)]
pub struct SnapshotCache {
    current: ArcSwap<Snapshot>,
}

impl SnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the published snapshot. The previous one is discarded.
    pub fn set(&self, results: Vec<DomainCheckResult>) {
        self.current.store(Arc::new(Snapshot {
            results,
            published_at: Some(SystemTime::now()),
        }));
    }

    /// Independent copy of the current results; empty before the first `set`.
    pub fn get(&self) -> Vec<DomainCheckResult> {
        self.current.load().results.clone()
    }

    /// Shared handle to the current snapshot, for callers needing more than
    /// the result list.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    pub fn last_updated(&self) -> Option<SystemTime> {
        self.current.load().published_at
    }
}
