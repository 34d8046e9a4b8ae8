// src/specs/payroll.rs
//! The all-years payroll page.
//!
//! One long document: a heading such as `<h3>2004 MLB Payrolls</h3>` (or a
//! bold line) followed by that season's table(s). A table belongs to the
//! nearest heading above it that names a season.

use std::collections::BTreeMap;

use scraper::{ElementRef, Html};

use crate::core::html::{is_nested_in_table, is_tag, text_of};
use crate::core::sanitize::{contains_any_ci, find_year};
use crate::table::StructuredRecord;
use crate::teams::Team;

const HEADING_TAGS: &[&str] = &["h2", "h3", "b", "strong"];
const HEADING_KEYWORDS: &[&str] = &["payroll", "mlb", "team", "opening"];
/// First-column markers of payroll rows that are not teams.
const NON_TEAM_MARKERS: &[&str] = &["total", "rank"];

/// Year → outer HTML of every top-level table under that year's heading.
#[derive(Clone, Debug, Default)]
pub struct PayrollIndex {
    by_year: BTreeMap<u16, Vec<String>>,
}

impl PayrollIndex {
    pub fn parse(html: &str) -> Self {
        let doc = Html::parse_document(html);
        let mut by_year: BTreeMap<u16, Vec<String>> = BTreeMap::new();
        let mut current: Option<u16> = None;

        for el in doc.tree.root().descendants().filter_map(ElementRef::wrap) {
            if is_nested_in_table(el) {
                continue;
            }
            if HEADING_TAGS.iter().any(|t| is_tag(el, t)) {
                let text = text_of(el);
                if contains_any_ci(&text, HEADING_KEYWORDS) {
                    if let Some(y) = find_year(&text) {
                        current = Some(y);
                    }
                }
            } else if is_tag(el, "table") {
                if let Some(y) = current {
                    by_year.entry(y).or_default().push(el.html());
                }
            }
        }
        Self { by_year }
    }

    pub fn tables(&self, year: u16) -> &[String] {
        self.by_year.get(&year).map_or(&[], Vec::as_slice)
    }

    pub fn years(&self) -> impl Iterator<Item = u16> + '_ {
        self.by_year.keys().copied()
    }

    pub fn is_empty(&self) -> bool { self.by_year.is_empty() }
}

/// Drop running totals and rank-header rows the general materializer keeps.
pub fn drop_non_team_rows(rec: &mut StructuredRecord) {
    rec.retain_by_first(|first| !contains_any_ci(first, NON_TEAM_MARKERS));
}

/// One team's payroll for one season.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PayrollRecord {
    pub team: Team,
    pub amount: i64,
    pub year: u16,
}

/// `Tm,Payroll` table, highest payroll first (ties by name).
pub fn payroll_table(records: &[PayrollRecord]) -> StructuredRecord {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount).then_with(|| a.team.name().cmp(b.team.name())));
    StructuredRecord {
        headers: cells!["Tm", "Payroll"],
        rows: sorted
            .iter()
            .map(|r| vec![s!(r.team.name()), r.amount.to_string()])
            .collect(),
    }
}
