// src/pipeline/mod.rs
//! Per-period orchestration and the multi-period driver.
//!
//! ```text
//! Driver ─ for each period ─▶ Pipeline::run_period
//!                              ├─ stats:   fetch → discover → locate → normalize → write
//!                              └─ payroll: override? → page index → infer roles → dedupe → write
//! ```

mod driver;
mod payroll;
mod period;
mod result;

use std::fmt;

pub use driver::{run_periods, RunSummary};
pub use payroll::{extract_payroll_records, PayrollExtraction};
pub use period::Pipeline;
pub use result::{ExtractionResult, Status, Warning};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Discovering,
    Materializing,
    Normalizing,
    Validating,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Fetching => "fetching",
            Stage::Discovering => "discovering",
            Stage::Materializing => "materializing",
            Stage::Normalizing => "inferring/normalizing",
            Stage::Validating => "validating",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
