// src/progress.rs
use crate::pipeline::ExtractionResult;

/// Progress reporting for the multi-period driver.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of periods queued.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called once per period, whatever its outcome.
    fn item_done(&mut self, _period: u16, _result: &ExtractionResult) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
