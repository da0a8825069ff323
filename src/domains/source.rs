//! Domain list loading.
//!
//! # Responsibilities
//! - Supply the ordered list of domains for one check cycle
//! - Read the two-column CSV format (header row, domain in first column)
//! - Report missing, unreadable, malformed or empty files as [`SourceError`]

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced while loading the domain list.
#[derive(Debug, Error)]
pub enum SourceError {
    /// File missing or unreadable.
    #[error("failed to open domain file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV (e.g. rows with differing field counts).
    #[error("failed to read domain file {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// No data rows after the header.
    #[error("no domains found in {}", path.display())]
    Empty { path: PathBuf },
}

/// Supplies the domains to check. Called once per cycle, on the blocking pool.
pub trait DomainSource: Send + Sync + 'static {
    fn load(&self) -> Result<Vec<String>, SourceError>;
}

/// Reads domains from a CSV file on every load, so edits are picked up
/// on the next cycle.
#[derive(Debug, Clone)]
pub struct CsvDomainSource {
    path: PathBuf,
}

impl CsvDomainSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DomainSource for CsvDomainSource {
    fn load(&self) -> Result<Vec<String>, SourceError> {
        let file = File::open(&self.path).map_err(|source| SourceError::Io {
            path: self.path.clone(),
            source,
        })?;
        read_domains(file, &self.path)
    }
}

/// Parse CSV content. The first record is the header; blank first-column
/// values are skipped.
pub fn read_domains<R: Read>(reader: R, path: &Path) -> Result<Vec<String>, SourceError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let records = csv_reader
        .records()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| SourceError::Csv {
            path: path.to_path_buf(),
            source,
        })?;

    if records.len() <= 1 {
        return Err(SourceError::Empty {
            path: path.to_path_buf(),
        });
    }

    let domains = records[1..]
        .iter()
        .filter_map(|record| record.get(0))
        .filter(|domain| !domain.is_empty())
        .map(str::to_string)
        .collect();

    Ok(domains)
}
