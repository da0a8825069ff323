//! Domain source subsystem.
//!
//! # Data Flow
//! ```text
//! Scheduler tick
//!     → source.rs (DomainSource::load)
//!     → Vec<String> in file order, duplicates kept
//!     → Fan-out checker
//! ```
//!
//! # Design Decisions
//! - The file is re-read every cycle; there is no caching of the list
//! - Load failures are returned, never panicked on; the scheduler decides

pub mod source;

pub use source::{CsvDomainSource, DomainSource, SourceError};
