// src/pipeline/driver.rs
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{error, info, warn};

use super::{ExtractionResult, Pipeline, Status};
use crate::core::net::PageFetcher;
use crate::progress::Progress;
use crate::store::Storage;

/// Aggregate of a whole run. Owned by the driver, handed back at the end.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub results: BTreeMap<u16, ExtractionResult>,
    /// Period during which the user interrupted, if any.
    pub interrupted: Option<u16>,
}

impl RunSummary {
    pub fn failed(&self) -> impl Iterator<Item = &ExtractionResult> {
        self.results.values().filter(|r| r.is_failed())
    }

    pub fn any_failed(&self) -> bool { self.failed().next().is_some() }

    pub fn files(&self) -> impl Iterator<Item = &PathBuf> {
        self.results.values().flat_map(|r| r.files.iter())
    }

    pub fn count(&self, status: Status) -> usize {
        self.results.values().filter(|r| r.status == status).count()
    }
}

/// Process `periods` strictly in order on one fetch session.
///
/// The session is recycled before every period after the first. A period
/// that blows up (storage failure) is recorded as failed and followed by a
/// recovery reset; if a reset fails, the period it was meant for is marked
/// failed and the loop moves on. Cancellation is honoured between periods.
pub fn run_periods<F, S>(
    pipeline: &mut Pipeline<F, S>,
    periods: &[u16],
    pause: Duration,
    progress: &mut dyn Progress,
) -> RunSummary
where
    F: PageFetcher,
    S: Storage,
{
    let mut summary = RunSummary::default();
    let started = Instant::now();
    let mut fresh_session = true;

    progress.begin(periods.len());

    for (i, &period) in periods.iter().enumerate() {
        if i > 0 && !pause.is_zero() {
            progress.log(&format!("pausing {} ms", pause.as_millis()));
            sleep_unless_cancelled(pipeline, pause);
        }
        if pipeline.is_cancelled() {
            stop(&mut summary, period, progress);
            break;
        }

        if !fresh_session {
            if let Err(e) = pipeline.reset() {
                error!(period, "session reset failed: {e}");
                let r = ExtractionResult::failed(period, format!("session reset failed: {e}"));
                progress.item_done(period, &r);
                summary.results.insert(period, r);
                continue;
            }
        }
        fresh_session = false;

        progress.log(&format!("{period}: starting"));
        let result = match pipeline.run_period(period) {
            Ok(r) => r,
            Err(e) => {
                error!(period, "unexpected failure: {e}");
                match pipeline.reset() {
                    Ok(()) => fresh_session = true,
                    Err(re) => warn!(period, "recovery reset failed: {re}"),
                }
                ExtractionResult::failed(period, e.to_string())
            }
        };

        let interrupted = result.status == Status::Interrupted;
        progress.item_done(period, &result);
        summary.results.insert(period, result);
        if interrupted {
            summary.interrupted = Some(period);
            break;
        }
    }

    info!(
        periods = summary.results.len(),
        failed = summary.count(Status::Failed),
        elapsed_s = started.elapsed().as_secs(),
        "run finished"
    );
    progress.finish();
    summary
}

fn stop(summary: &mut RunSummary, period: u16, progress: &mut dyn Progress) {
    info!(period, "interrupted before period start");
    let r = ExtractionResult::interrupted(period);
    progress.item_done(period, &r);
    summary.results.insert(period, r);
    summary.interrupted = Some(period);
}

fn sleep_unless_cancelled<F: PageFetcher, S: Storage>(pipeline: &Pipeline<F, S>, total: Duration) {
    let step = Duration::from_millis(100);
    let started = Instant::now();
    while !pipeline.is_cancelled() {
        let left = total.saturating_sub(started.elapsed());
        if left.is_zero() {
            break;
        }
        thread::sleep(left.min(step));
    }
}
