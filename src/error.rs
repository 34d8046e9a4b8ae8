// src/error.rs
//! Error types for the fatal paths only.
//!
//! Anything that merely degrades a period (a skipped table, an unknown team
//! name, a discovery cutoff) is a `pipeline::Warning` value instead.

use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

use crate::pipeline::Stage;

/// Page Fetcher failures. Any of these aborts the stats half of a period.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("navigation to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("{url} answered HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("could not relaunch fetch session: {0}")]
    Reset(String),

    #[error("fixture read failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path exists but is not a directory: {0}")]
    NotADirectory(PathBuf),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid period list '{0}'")]
    InvalidPeriods(String),

    #[error("period budget {got}s is below the {floor}s discovery floor")]
    InvalidBudget { got: u64, floor: u64 },
}

/// Why a period (or one source within it) ended in `Failed`.
#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("page did not finish loading within {0:?}")]
    PageLoad(Duration),

    #[error("budget exhausted while {stage}: {remaining:?} left, need {floor:?}")]
    Timeout {
        stage: Stage,
        remaining: Duration,
        floor: Duration,
    },

    #[error("no usable table survived validation")]
    NoUsableTables,

    #[error("storage failed: {0}")]
    Storage(#[from] StorageError),
}

impl PeriodError {
    /// Input failures that end the whole period, not just one table.
    pub fn aborts_period(&self) -> bool {
        matches!(self, PeriodError::Fetch(_) | PeriodError::PageLoad(_) | PeriodError::Timeout { .. })
    }
}
