//! Domain monitoring subsystem.
//!
//! # Data Flow
//! ```text
//! scheduler.rs (immediately, then every interval)
//!     → DomainSource::load
//!     → fanout.rs (one task per domain)
//!         → probe.rs (GET <scheme>://<domain>, bounded timeout) ×N
//!     → join on all results
//!     → SnapshotCache::set
//! ```
//!
//! # Design Decisions
//! - Probe failures are data (`error` field), never propagated
//! - Cycles are sequential; a tick never starts before the previous publish
//! - Each probe has its own timeout; there is no whole-cycle deadline

pub mod fanout;
pub mod probe;
pub mod result;
pub mod scheduler;

pub use fanout::FanoutChecker;
pub use probe::{HttpProber, Probe};
pub use result::DomainCheckResult;
pub use scheduler::{CycleOutcome, Scheduler};
