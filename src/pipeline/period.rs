// src/pipeline/period.rs
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, info_span, Span};

use super::payroll::PayrollSource;
use super::{ExtractionResult, Stage, Status, Warning};
use crate::config::consts::{DISCOVERY_CAP_SECS, DISCOVERY_FLOOR_SECS, PAGE_READY_WAIT_SECS, READY_POLL_MS};
use crate::config::{RunOptions, Source};
use crate::core::net::PageFetcher;
use crate::error::{FetchError, PeriodError, StorageError};
use crate::specs::stats::{locate, stats_url, Located};
use crate::specs::LogicalTable;
use crate::store::Storage;
use crate::table::{discover_tables, DiscoveryLimits};
use crate::teams::Normalizer;

/// Everything one run shares across periods: the fetch session, the store,
/// the lookup tables and the (lazily fetched) payroll page.
pub struct Pipeline<F, S> {
    pub(super) fetcher: F,
    pub(super) store: S,
    pub(super) norm: Normalizer<'static>,
    pub(super) sources: Vec<Source>,
    pub(super) budget: Duration,
    pub(super) ready_wait: Duration,
    pub(super) cancel: Arc<AtomicBool>,
    pub(super) payroll: PayrollSource,
}

impl<F: PageFetcher, S: Storage> Pipeline<F, S> {
    pub fn new(fetcher: F, store: S, opts: &RunOptions) -> Self {
        Self {
            fetcher,
            store,
            norm: Normalizer::default(),
            sources: opts.sources.clone(),
            budget: opts.period_budget(),
            ready_wait: Duration::from_secs(PAGE_READY_WAIT_SECS),
            cancel: Arc::new(AtomicBool::new(false)),
            payroll: PayrollSource::NotLoaded,
        }
    }

    /// Share a cancellation flag with whoever catches the interrupt.
    pub fn with_cancel(mut self, cancel: Arc<AtomicBool>) -> Self {
        self.cancel = cancel;
        self
    }

    /// Upper bound on waiting for the page-load probe after navigation.
    pub fn with_ready_wait(mut self, wait: Duration) -> Self {
        self.ready_wait = wait;
        self
    }

    pub fn cancel_flag(&self) -> Arc<AtomicBool> { Arc::clone(&self.cancel) }

    pub fn is_cancelled(&self) -> bool { self.cancel.load(Ordering::Relaxed) }

    pub fn store(&self) -> &S { &self.store }

    pub fn into_parts(self) -> (F, S) { (self.fetcher, self.store) }

    /// Close and relaunch the fetch session.
    pub fn reset(&mut self) -> Result<(), FetchError> { self.fetcher.reset() }

    /// Run every configured source for one period.
    ///
    /// Input failures (navigation, page load, budget) end up in the result;
    /// only a storage failure comes back as `Err`.
    pub fn run_period(&mut self, period: u16) -> Result<ExtractionResult, StorageError> {
        let span = info_span!("period", period, stage = tracing::field::Empty);
        let _enter = span.enter();
        info!("period start");

        let started = Instant::now();
        let mut res = ExtractionResult::new(period);

        if self.sources.contains(&Source::Stats) {
            match self.run_stats(period, started, &mut res, &span) {
                Ok(()) => {}
                Err(PeriodError::Storage(e)) => return Err(e),
                Err(e) => res.fail(&e),
            }
        }
        if self.sources.contains(&Source::Payroll) && !res.aborted && !self.is_cancelled() {
            span.record("stage", Stage::Fetching.as_str());
            match self.run_payroll(period, started, &mut res) {
                Ok(()) => {}
                Err(PeriodError::Storage(e)) => return Err(e),
                Err(e) => res.fail(&e),
            }
        }

        if self.is_cancelled() {
            res.status = Status::Interrupted;
        }
        res.finalize();
        info!(status = %res.status, files = res.files.len(), warnings = res.warnings.len(), "period done");
        Ok(res)
    }

    /// Budget left in the period that began at `started`.
    pub(super) fn remaining(&self, started: Instant) -> Duration { self.budget.saturating_sub(started.elapsed()) }

    fn run_stats(
        &mut self,
        period: u16,
        started: Instant,
        res: &mut ExtractionResult,
        span: &Span,
    ) -> Result<(), PeriodError> {
        span.record("stage", Stage::Fetching.as_str());
        let url = stats_url(period);
        info!(url = %url, "loading page");
        let html = self.fetcher.fetch(&url)?;

        let wait = self.ready_wait.min(self.remaining(started));
        if !self.wait_ready(wait) {
            return Err(PeriodError::PageLoad(wait));
        }

        let left = self.remaining(started);
        let floor = Duration::from_secs(DISCOVERY_FLOOR_SECS);
        if left < floor {
            return Err(PeriodError::Timeout { stage: Stage::Discovering, remaining: left, floor });
        }

        span.record("stage", Stage::Discovering.as_str());
        let limits = DiscoveryLimits {
            budget: left.min(Duration::from_secs(DISCOVERY_CAP_SECS)),
            ..DiscoveryLimits::default()
        };
        let found = discover_tables(&html, &limits);
        info!(tables = found.tables.len(), "tables discovered");
        res.tables_found.extend(found.ids());
        if let Some(cutoff) = found.cutoff {
            res.warn(Warning::DiscoveryPartial { cutoff, found: found.tables.len() });
        }

        for logical in LogicalTable::STATS {
            if self.is_cancelled() {
                info!("interrupted between tables");
                return Ok(());
            }

            span.record("stage", Stage::Materializing.as_str());
            let record = match locate(&found, logical) {
                Located::Found { record, .. } => record,
                Located::Missing => {
                    res.warn(Warning::MissingTable { table: logical });
                    continue;
                }
                Located::Unusable { skipped, empty } => {
                    for (id, reason) in skipped {
                        res.warn(Warning::MaterializationSkipped { table: logical, id: s!(id), reason });
                    }
                    if !empty.is_empty() {
                        res.warn(Warning::ValidationFailed {
                            table: logical,
                            reason: format!("no rows left in {}", empty.join(", ")),
                        });
                    }
                    continue;
                }
            };

            span.record("stage", Stage::Normalizing.as_str());
            let out = self.norm.normalize_record(&record);
            for c in &out.changes {
                debug!(table = %logical, column = %c.column, row = ?c.row, old = %c.old, new = %c.new, kind = ?c.kind, "normalized");
            }
            for value in out.unresolved {
                res.warn(Warning::UnresolvedEntity { table: logical, value });
            }

            span.record("stage", Stage::Validating.as_str());
            if out.record.is_empty() {
                res.warn(Warning::ValidationFailed { table: logical, reason: s!("no rows") });
                continue;
            }
            let path = self.store.write_table(period, logical, &out.record)?;
            info!(table = %logical, rows = out.record.len(), path = %path.display(), "saved");
            res.files.push(path);
        }
        Ok(())
    }

    /// Poll the page-load probe until it answers or `wait` runs out.
    pub(super) fn wait_ready(&mut self, wait: Duration) -> bool {
        let started = Instant::now();
        loop {
            if self.fetcher.ready() {
                return true;
            }
            if started.elapsed() >= wait || self.is_cancelled() {
                return false;
            }
            thread::sleep(Duration::from_millis(READY_POLL_MS).min(wait));
        }
    }
}
