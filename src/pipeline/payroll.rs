// src/pipeline/payroll.rs
use std::collections::HashMap;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::{ExtractionResult, Pipeline, Warning};
use crate::config::consts::{MIN_PAYROLL_ROWS, PAYROLL_URL};
use crate::config::Source;
use crate::core::currency::parse_amount;
use crate::core::net::PageFetcher;
use crate::error::{FetchError, PeriodError};
use crate::specs::overrides::payroll_override;
use crate::specs::payroll::{drop_non_team_rows, payroll_table, PayrollIndex, PayrollRecord};
use crate::specs::LogicalTable;
use crate::store::Storage;
use crate::table::{infer_identity_column, infer_payroll_column, materialize, Confidence, Materialized, StructuredRecord};
use crate::teams::{Normalizer, Team};

const TABLE: LogicalTable = LogicalTable::Payroll;

/// The payroll page is fetched once per run; a failed fetch is retried in
/// the next period, after the session has been recycled.
pub(super) enum PayrollSource {
    NotLoaded,
    Loaded(PayrollIndex),
}

/// Records pulled from a season's candidate tables plus what went wrong.
#[derive(Debug, Default)]
pub struct PayrollExtraction {
    pub records: Vec<PayrollRecord>,
    pub warnings: Vec<Warning>,
}

/// Candidate tables → one record per team.
///
/// Tables with a full season's worth of rows are all used, in page order;
/// otherwise only the last candidate is. The first validated amount for a
/// team wins and later disagreeing amounts are reported.
pub fn extract_payroll_records(tables: &[StructuredRecord], year: u16, norm: &Normalizer<'_>) -> PayrollExtraction {
    let mut out = PayrollExtraction::default();

    let full: Vec<&StructuredRecord> = tables.iter().filter(|t| t.len() >= MIN_PAYROLL_ROWS).collect();
    let chosen: Vec<&StructuredRecord> = if full.is_empty() {
        tables.iter().rev().find(|t| !t.is_empty()).into_iter().collect()
    } else {
        full
    };

    let mut kept: HashMap<Team, i64> = HashMap::new();
    let mut unresolved: Vec<String> = Vec::new();

    for rec in chosen {
        let Some(id) = infer_identity_column(rec, norm) else { continue };
        if id.confidence == Confidence::Low {
            out.warnings.push(Warning::RoleInferenceAmbiguous { table: TABLE, role: "team", strategy: id.strategy });
        }
        let Some(pay) = infer_payroll_column(rec, Some(id.index)) else {
            out.warnings.push(Warning::ValidationFailed { table: TABLE, reason: s!("no numeric column") });
            continue;
        };
        if pay.confidence == Confidence::Low {
            out.warnings.push(Warning::RoleInferenceAmbiguous { table: TABLE, role: "payroll", strategy: pay.strategy });
        }
        debug!(year, team_col = %rec.headers[id.index], payroll_col = %rec.headers[pay.index], "payroll roles");

        for row in &rec.rows {
            let (Some(raw_team), Some(raw_amount)) = (row.get(id.index), row.get(pay.index)) else { continue };
            let raw_team = raw_team.as_str();
            let Some(amount) = parse_amount(raw_amount).filter(|v| *v > 0) else { continue };
            let n = norm.normalize_identity(raw_team);
            let Some(team) = n.team() else {
                if !raw_team.is_empty() && !unresolved.iter().any(|u| u == raw_team) {
                    unresolved.push(s!(raw_team));
                }
                continue;
            };
            match kept.get(&team) {
                None => {
                    kept.insert(team, amount);
                    out.records.push(PayrollRecord { team, amount, year });
                }
                Some(&k) if k != amount => {
                    out.warnings.push(Warning::DuplicateRecord { team, kept: k, dropped: amount });
                }
                Some(_) => {}
            }
        }
    }

    out.warnings.extend(unresolved.into_iter().map(|value| Warning::UnresolvedEntity { table: TABLE, value }));
    out
}

impl<F: PageFetcher, S: Storage> Pipeline<F, S> {
    pub(super) fn run_payroll(
        &mut self,
        period: u16,
        started: Instant,
        res: &mut ExtractionResult,
    ) -> Result<(), PeriodError> {
        if let Some(rows) = payroll_override(period) {
            info!(teams = rows.len(), "payroll from curated override");
            let records: Vec<PayrollRecord> = rows
                .iter()
                .map(|&(team, amount)| PayrollRecord { team, amount, year: period })
                .collect();
            let path = self.store.write_table(period, TABLE, &payroll_table(&records))?;
            res.files.push(path);
            return Ok(());
        }

        let index = match self.payroll_index(started) {
            Ok(index) => index,
            Err(reason) => {
                res.warn(Warning::SourceUnavailable { source: Source::Payroll, reason });
                return Ok(());
            }
        };

        let raw = index.tables(period);
        if raw.is_empty() {
            res.warn(Warning::MissingTable { table: TABLE });
            return Ok(());
        }

        let mut tables = Vec::with_capacity(raw.len());
        for (k, html) in raw.iter().enumerate() {
            res.tables_found.push(format!("payroll[{k}]"));
            match materialize(html) {
                Materialized::Table(mut t) => {
                    drop_non_team_rows(&mut t);
                    tables.push(t);
                }
                Materialized::Skipped(reason) => {
                    res.warn(Warning::MaterializationSkipped { table: TABLE, id: format!("payroll[{k}]"), reason });
                }
            }
        }

        let extracted = extract_payroll_records(&tables, period, &self.norm);
        for w in extracted.warnings {
            res.warn(w);
        }
        if extracted.records.is_empty() {
            res.warn(Warning::ValidationFailed { table: TABLE, reason: s!("no valid team payrolls") });
            return Ok(());
        }

        let path = self.store.write_table(period, TABLE, &payroll_table(&extracted.records))?;
        info!(teams = extracted.records.len(), path = %path.display(), "saved payroll");
        res.files.push(path);
        Ok(())
    }

    /// Fetch and index the payroll page on first use. Only a good index is kept.
    fn payroll_index(&mut self, started: Instant) -> Result<&PayrollIndex, String> {
        if matches!(self.payroll, PayrollSource::NotLoaded) {
            match self.load_payroll_page(started) {
                Ok(index) => {
                    info!(years = index.years().count(), "payroll page indexed");
                    self.payroll = PayrollSource::Loaded(index);
                }
                Err(e) => {
                    warn!("payroll page unavailable: {e}");
                    return Err(e.to_string());
                }
            }
        }
        match &self.payroll {
            PayrollSource::Loaded(index) => Ok(index),
            PayrollSource::NotLoaded => Err(s!("payroll page not loaded")),
        }
    }

    fn load_payroll_page(&mut self, started: Instant) -> Result<PayrollIndex, PeriodError> {
        let html = self.fetcher.fetch(PAYROLL_URL)?;
        let wait = self.ready_wait.min(self.remaining(started));
        if !self.wait_ready(wait) {
            return Err(PeriodError::PageLoad(wait));
        }
        let index = PayrollIndex::parse(&html);
        if index.is_empty() {
            return Err(PeriodError::Fetch(FetchError::Navigation {
                url: s!(PAYROLL_URL),
                reason: s!("no season headings found"),
            }));
        }
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> StructuredRecord {
        StructuredRecord {
            headers: cells!["Team", "Avg Salary", "Payroll"],
            rows: rows.iter().map(|(t, p)| cells![*t, "$2,000,000", *p]).collect(),
        }
    }

    #[test]
    fn disagreeing_tables_keep_first_value() {
        let norm = Normalizer::default();
        let a = table(&[("Yankees", "$90,000,000"), ("Boston", "$80,000,000"), ("Mets", "$70,000,000")]);
        let b = table(&[("New York Yankees", "$91,000,000"), ("Boston Red Sox", "$80,000,000")]);
        let out = extract_payroll_records(&[b.clone(), a.clone()], 2001, &norm);
        // neither reaches a full season: only the last candidate counts
        assert_eq!(out.records.len(), 3);
        assert!(out.warnings.iter().all(|w| !matches!(w, Warning::DuplicateRecord { .. })));

        let rows: Vec<(String, String)> = (0..20).map(|i| (format!("Gotham {i}"), s!("$50,000,000"))).collect();
        let mut filler: Vec<(&str, &str)> = rows.iter().map(|(t, p)| (t.as_str(), p.as_str())).collect();
        filler.extend([("Yankees", "$90,000,000"), ("Boston", "$80,000,000")]);
        let big_a = table(&filler);
        filler.truncate(20);
        filler.push(("NY Yankees", "$95,000,000"));
        let big_b = table(&filler);

        let out = extract_payroll_records(&[big_a, big_b], 2001, &norm);
        let yanks: Vec<_> = out.records.iter().filter(|r| r.team == Team::Yankees).collect();
        assert_eq!(yanks.len(), 1);
        assert_eq!(yanks[0].amount, 90_000_000);
        assert!(out.warnings.contains(&Warning::DuplicateRecord {
            team: Team::Yankees,
            kept: 90_000_000,
            dropped: 95_000_000
        }));
        assert!(out.warnings.iter().any(|w| matches!(w, Warning::UnresolvedEntity { value, .. } if value == "Gotham 0")));
    }

    #[test]
    fn empty_amounts_are_skipped_not_zeroed() {
        let norm = Normalizer::default();
        let t = StructuredRecord {
            headers: cells!["Team", "Payroll"],
            rows: vec![
                cells!["Yankees", "$90,000,000"],
                cells!["Mets", "N/A"],
                cells!["Boston", "$80,000,000"],
                cells!["Texas", "$60,000,000"],
            ],
        };
        let out = extract_payroll_records(&[t], 2002, &norm);
        assert_eq!(out.records.len(), 3);
        assert!(out.records.iter().all(|r| r.team != Team::Mets && r.amount > 0));
    }
}
