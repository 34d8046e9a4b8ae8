// src/pipeline/result.rs
use std::fmt;
use std::path::PathBuf;

use tracing::{error, warn};

use crate::config::Source;
use crate::error::PeriodError;
use crate::specs::LogicalTable;
use crate::table::{Cutoff, SkipReason};
use crate::teams::Team;

/// Something that degraded a period without failing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Warning {
    DiscoveryPartial { cutoff: Cutoff, found: usize },
    MissingTable { table: LogicalTable },
    MaterializationSkipped { table: LogicalTable, id: String, reason: SkipReason },
    RoleInferenceAmbiguous { table: LogicalTable, role: &'static str, strategy: &'static str },
    UnresolvedEntity { table: LogicalTable, value: String },
    ValidationFailed { table: LogicalTable, reason: String },
    DuplicateRecord { team: Team, kept: i64, dropped: i64 },
    SourceUnavailable { source: Source, reason: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::DiscoveryPartial { cutoff, found } => {
                write!(f, "discovery partial ({cutoff}), {found} tables kept")
            }
            Warning::MissingTable { table } => write!(f, "{table}: no table on the page"),
            Warning::MaterializationSkipped { table, id, reason } => {
                write!(f, "{table}: candidate '{id}' skipped ({reason})")
            }
            Warning::RoleInferenceAmbiguous { table, role, strategy } => {
                write!(f, "{table}: {role} column chosen by low-confidence fallback '{strategy}'")
            }
            Warning::UnresolvedEntity { table, value } => write!(f, "{table}: unrecognized team '{value}'"),
            Warning::ValidationFailed { table, reason } => write!(f, "{table}: not written, {reason}"),
            Warning::DuplicateRecord { team, kept, dropped } => {
                write!(f, "payroll: duplicate {team}, kept {kept}, dropped {dropped}")
            }
            Warning::SourceUnavailable { source, reason } => {
                write!(f, "{} source unavailable: {reason}", source.as_str())
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Succeeded,
    PartialFailure,
    Failed,
    Interrupted,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Status::Succeeded => "ok",
            Status::PartialFailure => "partial",
            Status::Failed => "FAILED",
            Status::Interrupted => "interrupted",
        })
    }
}

/// Outcome of one period, owned by the driver once returned.
#[derive(Clone, Debug)]
pub struct ExtractionResult {
    pub period: u16,
    pub status: Status,
    pub files: Vec<PathBuf>,
    pub tables_found: Vec<String>,
    pub warnings: Vec<Warning>,
    pub failure: Option<String>,
    /// Set once a fetch, page-load or budget failure has ended the period.
    pub aborted: bool,
}

impl ExtractionResult {
    pub fn new(period: u16) -> Self {
        Self {
            period,
            status: Status::Succeeded,
            files: Vec::new(),
            tables_found: Vec::new(),
            warnings: Vec::new(),
            failure: None,
            aborted: false,
        }
    }

    /// A period that never got to run (reset failed, unexpected error).
    pub fn failed(period: u16, reason: impl Into<String>) -> Self {
        let mut r = Self::new(period);
        r.failure = Some(reason.into());
        r.status = Status::Failed;
        r
    }

    pub fn interrupted(period: u16) -> Self {
        let mut r = Self::new(period);
        r.status = Status::Interrupted;
        r
    }

    pub fn warn(&mut self, w: Warning) {
        warn!(period = self.period, "{w}");
        self.warnings.push(w);
    }

    pub fn fail(&mut self, err: &PeriodError) {
        error!(period = self.period, "{err}");
        self.aborted |= err.aborts_period();
        let msg = err.to_string();
        self.failure = Some(match self.failure.take() {
            Some(prev) => format!("{prev}; {msg}"),
            None => msg,
        });
    }

    /// Settle the status: an aborted period or nothing written is a failure,
    /// anything short of a clean run is partial.
    pub fn finalize(&mut self) {
        if self.status == Status::Interrupted {
            return;
        }
        self.status = if self.aborted {
            Status::Failed
        } else if self.files.is_empty() {
            if self.failure.is_none() {
                self.failure = Some(PeriodError::NoUsableTables.to_string());
            }
            Status::Failed
        } else if self.failure.is_some() || !self.warnings.is_empty() {
            Status::PartialFailure
        } else {
            Status::Succeeded
        };
    }

    pub fn is_failed(&self) -> bool { self.status == Status::Failed }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchError;

    #[test]
    fn status_follows_outputs() {
        let mut r = ExtractionResult::new(2004);
        r.finalize();
        assert_eq!(r.status, Status::Failed);
        assert_eq!(r.failure.as_deref(), Some("no usable table survived validation"));

        let mut r = ExtractionResult::new(2004);
        r.files.push(PathBuf::from("a.csv"));
        r.finalize();
        assert_eq!(r.status, Status::Succeeded);

        r.warn(Warning::MissingTable { table: LogicalTable::Postseason });
        r.finalize();
        assert_eq!(r.status, Status::PartialFailure);
    }

    #[test]
    fn aborting_failure_wins_over_written_files() {
        let mut r = ExtractionResult::new(1998);
        r.files.push(PathBuf::from("Salaries_1998.csv"));
        r.fail(&PeriodError::PageLoad(std::time::Duration::from_secs(15)));
        r.finalize();
        assert!(r.aborted);
        assert_eq!(r.status, Status::Failed);

        let mut r = ExtractionResult::new(1998);
        r.files.push(PathBuf::from("Salaries_1998.csv"));
        r.fail(&PeriodError::NoUsableTables);
        r.finalize();
        assert_eq!(r.status, Status::PartialFailure);
    }

    #[test]
    fn failures_accumulate() {
        let mut r = ExtractionResult::new(2010);
        r.fail(&PeriodError::Fetch(FetchError::Reset(s!("a"))));
        r.fail(&PeriodError::NoUsableTables);
        assert!(r.failure.as_deref().unwrap().contains("; no usable table"));
    }
}
