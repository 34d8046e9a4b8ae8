// src/specs/stats.rs
//! Yearly league page: `/leagues/majors/{year}.shtml`.
//!
//! Most team tables after the first are shipped inside HTML comments and
//! only un-commented by page script, so they come out of the comment pass of
//! discovery. Ids moved around over the years; each logical table lists the
//! ids it has gone by, newest layout first.

use tracing::debug;

use super::LogicalTable;
use crate::config::consts::STATS_URL_TMPL;
use crate::table::{materialize, Discovery, Materialized, SkipReason, StructuredRecord};

pub fn stats_url(year: u16) -> String {
    STATS_URL_TMPL.replace("{year}", &year.to_string())
}

/// What happened to one logical table.
#[derive(Debug)]
pub enum Located {
    /// First id that materialized into at least one row.
    Found { id: &'static str, record: StructuredRecord },
    /// Ids were on the page but none yielded rows.
    Unusable { skipped: Vec<(&'static str, SkipReason)>, empty: Vec<&'static str> },
    /// None of the ids were on the page.
    Missing,
}

/// Try each id of `logical` in order against what discovery found.
pub fn locate(discovery: &Discovery, logical: LogicalTable) -> Located {
    let mut skipped = Vec::new();
    let mut empty = Vec::new();

    for &id in logical.table_ids() {
        let Some(raw) = discovery.get(id) else { continue };
        match materialize(&raw.html) {
            Materialized::Table(record) if !record.is_empty() => {
                debug!(%logical, id, rows = record.len(), cols = record.width(), origin = ?raw.origin, "table located");
                return Located::Found { id, record };
            }
            Materialized::Table(_) => empty.push(id),
            Materialized::Skipped(reason) => skipped.push((id, reason)),
        }
    }

    if skipped.is_empty() && empty.is_empty() {
        Located::Missing
    } else {
        Located::Unusable { skipped, empty }
    }
}
