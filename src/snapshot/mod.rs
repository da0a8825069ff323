//! Snapshot cache subsystem.
//!
//! # Data Flow
//! ```text
//! Scheduler (single writer)
//!     → cache.rs set() : atomic Arc swap
//!
//! HTTP handlers (many readers)
//!     → cache.rs get() : clone of the current result list
//! ```
//!
//! # Design Decisions
//! - Constructed once in `main` and shared via `Arc`; no global instance
//! - Readers get copies, so later writes cannot change what they hold
//! - No history: each publish drops the previous snapshot

pub mod cache;

pub use cache::{Snapshot, SnapshotCache};
