// src/table/mod.rs
//! Generic table machinery, independent of which site a page came from.
//!
//! ```text
//! page html ─ discover ─▶ RawTable ─ materialize ─▶ StructuredRecord ─ roles ─▶ ColumnChoice
//! ```

pub mod discover;
pub mod materialize;
pub mod roles;

pub use discover::{discover_tables, discover_tables_with, Cutoff, Discovery, DiscoveryLimits, Pass};
pub use materialize::{materialize, Materialized, SkipReason};
pub use roles::{infer_identity_column, infer_payroll_column, ColumnChoice, Confidence};

/// Where a candidate table was found on the page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Origin {
    Visible,
    Comment,
}

/// One `<table>…</table>` as found on the page. Lives only during discovery.
#[derive(Clone, Debug)]
pub struct RawTable {
    pub id: String,
    pub origin: Origin,
    pub html: String,
}

/// Flattened headers plus rows that all have exactly `headers.len()` cells.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructuredRecord {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl StructuredRecord {
    pub fn width(&self) -> usize { self.headers.len() }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn column(&self, idx: usize) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(move |r| r.get(idx).map_or("", String::as_str))
    }

    pub fn get(&self, row: usize, header: &str) -> Option<&str> {
        let c = self.column_index(header)?;
        self.rows.get(row)?.get(c).map(String::as_str)
    }

    /// Keep only rows for which `keep(first_cell)` holds.
    pub fn retain_by_first(&mut self, mut keep: impl FnMut(&str) -> bool) {
        self.rows.retain(|r| keep(r.first().map_or("", String::as_str)));
    }
}
