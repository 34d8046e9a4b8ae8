// src/table/roles.rs
//! Column role inference: which column names the team, which holds the payroll.
//!
//! Each role is an ordered list of strategies. The first one that answers
//! wins, and its answer carries how much it should be trusted.

use super::StructuredRecord;
use crate::config::consts::{
    IDENTITY_SAMPLE_ROWS, MIN_IDENTITY_MATCHES, MIN_NUMERIC_VALUES, PAYROLL_MAX_THRESHOLD,
    PAYROLL_MEDIAN_THRESHOLD,
};
use crate::core::currency::parse_amount;
use crate::core::sanitize::contains_any_ci;
use crate::teams::Normalizer;

const IDENTITY_KEYWORDS: &[&str] = &["team", "tm", "name", "club"];
/// Per-player or summary figures: same units, much smaller magnitudes.
const DECOY_KEYWORDS: &[&str] = &["average", "avg", "median", "mean", "per", "minimum", "min"];
const PAYROLL_KEYWORDS: &[&str] = &["payroll", "total", "salary", "opening"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColumnChoice {
    pub index: usize,
    pub confidence: Confidence,
    pub strategy: &'static str,
}

/* ---------------- identity ---------------- */

type IdentityStrategy = fn(&StructuredRecord, &Normalizer<'_>) -> Option<ColumnChoice>;

const IDENTITY_STRATEGIES: &[IdentityStrategy] = &[by_header_keyword, by_sampled_content, first_column];

pub fn infer_identity_column(rec: &StructuredRecord, norm: &Normalizer<'_>) -> Option<ColumnChoice> {
    IDENTITY_STRATEGIES.iter().find_map(|s| s(rec, norm))
}

fn by_header_keyword(rec: &StructuredRecord, _: &Normalizer<'_>) -> Option<ColumnChoice> {
    rec.headers
        .iter()
        .position(|h| contains_any_ci(h, IDENTITY_KEYWORDS) && !contains_any_ci(h, PAYROLL_KEYWORDS))
        .map(|index| ColumnChoice { index, confidence: Confidence::High, strategy: "header_keyword" })
}

fn by_sampled_content(rec: &StructuredRecord, norm: &Normalizer<'_>) -> Option<ColumnChoice> {
    (0..rec.width())
        .find(|&c| {
            let hits = rec
                .column(c)
                .filter(|v| !v.is_empty())
                .take(IDENTITY_SAMPLE_ROWS)
                .filter(|v| norm.normalize_identity(v).is_resolved())
                .count();
            hits >= MIN_IDENTITY_MATCHES
        })
        .map(|index| ColumnChoice { index, confidence: Confidence::Medium, strategy: "sampled_content" })
}

fn first_column(rec: &StructuredRecord, _: &Normalizer<'_>) -> Option<ColumnChoice> {
    (rec.width() > 0).then_some(ColumnChoice { index: 0, confidence: Confidence::Low, strategy: "first_column" })
}

/* ---------------- payroll ---------------- */

#[derive(Clone, Debug)]
struct NumericProfile {
    index: usize,
    count: usize,
    max: i64,
    median: i64,
    keyword: bool,
    decoy: bool,
}

fn profile(rec: &StructuredRecord, index: usize) -> Option<NumericProfile> {
    let mut vals: Vec<i64> = rec.column(index).filter_map(parse_amount).collect();
    if vals.is_empty() {
        return None;
    }
    vals.sort_unstable();
    let n = vals.len();
    let median = if n % 2 == 1 {
        vals[n / 2]
    } else {
        ((vals[n / 2 - 1] as i128 + vals[n / 2] as i128) / 2) as i64
    };
    let header = &rec.headers[index];
    Some(NumericProfile {
        index,
        count: n,
        max: vals[n - 1],
        median,
        keyword: contains_any_ci(header, PAYROLL_KEYWORDS),
        decoy: contains_any_ci(header, DECOY_KEYWORDS),
    })
}

type PayrollStrategy = fn(&[NumericProfile], usize) -> Option<ColumnChoice>;

const PAYROLL_STRATEGIES: &[PayrollStrategy] = &[by_threshold, by_largest_max];

/// Pick the team-total payroll column. `None` only when no column other than
/// the identity column holds a single number.
pub fn infer_payroll_column(rec: &StructuredRecord, identity: Option<usize>) -> Option<ColumnChoice> {
    let profiles: Vec<NumericProfile> = (0..rec.width())
        .filter(|&c| Some(c) != identity)
        .filter_map(|c| profile(rec, c))
        .collect();
    let min_count = MIN_NUMERIC_VALUES.min(rec.len()).max(1);
    PAYROLL_STRATEGIES.iter().find_map(|s| s(&profiles, min_count))
}

/// Magnitude test: max above 10M and median above 5M, decoy headers excluded.
/// Keyword headers first, then the larger maximum, then the leftmost column.
fn by_threshold(profiles: &[NumericProfile], min_count: usize) -> Option<ColumnChoice> {
    profiles
        .iter()
        .filter(|p| !p.decoy && p.count >= min_count)
        .filter(|p| p.max > PAYROLL_MAX_THRESHOLD && p.median > PAYROLL_MEDIAN_THRESHOLD)
        .min_by_key(|p| (!p.keyword, std::cmp::Reverse(p.max), p.index))
        .map(|p| ColumnChoice {
            index: p.index,
            confidence: if p.keyword { Confidence::High } else { Confidence::Medium },
            strategy: "threshold",
        })
}

fn by_largest_max(profiles: &[NumericProfile], _: usize) -> Option<ColumnChoice> {
    profiles
        .iter()
        .min_by_key(|p| (std::cmp::Reverse(p.max), p.index))
        .map(|p| ColumnChoice { index: p.index, confidence: Confidence::Low, strategy: "largest_max" })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(headers: Vec<String>, rows: Vec<Vec<String>>) -> StructuredRecord {
        StructuredRecord { headers, rows }
    }

    fn payroll_rows(order: [usize; 3]) -> StructuredRecord {
        let cols = [
            ("Team", ["Yankees", "Red Sox", "Mets", "Dodgers"].map(String::from)),
            ("Avg Salary", ["$3,100,000", "$2,900,000", "$2,700,000", "$3,300,000"].map(String::from)),
            ("Total Payroll", ["$150,000,000", "$120,000,000", "$95,000,000", "$80,000,000"].map(String::from)),
        ];
        let headers = order.iter().map(|&i| s!(cols[i].0)).collect();
        let rows = (0..4)
            .map(|r| order.iter().map(|&i| cols[i].1[r].clone()).collect())
            .collect();
        rec(headers, rows)
    }

    #[test]
    fn total_payroll_beats_average_in_any_order() {
        let norm = Normalizer::default();
        for order in [[0, 1, 2], [0, 2, 1], [2, 1, 0], [1, 0, 2]] {
            let t = payroll_rows(order);
            let id = infer_identity_column(&t, &norm).unwrap();
            assert_eq!(t.headers[id.index], "Team");
            let pay = infer_payroll_column(&t, Some(id.index)).unwrap();
            assert_eq!(t.headers[pay.index], "Total Payroll", "{order:?}");
            assert_eq!(pay.confidence, Confidence::High);
        }
    }

    #[test]
    fn identity_by_content_then_first_column() {
        let norm = Normalizer::default();
        let t = rec(
            cells!["Rk", "Club Payroll", "Franchise"],
            vec![
                cells!["1", "$1", "1. Yankees"],
                cells!["2", "$2", "Boston Red Sox"],
                cells!["3", "$3", "Montreal Expos"],
            ],
        );
        let id = infer_identity_column(&t, &norm).unwrap();
        assert_eq!((id.index, id.strategy), (2, "sampled_content"));

        let t = rec(cells!["A", "B"], vec![cells!["x", "1"], cells!["y", "2"]]);
        let id = infer_identity_column(&t, &norm).unwrap();
        assert_eq!((id.index, id.confidence), (0, Confidence::Low));
    }

    #[test]
    fn small_magnitudes_fall_back_with_low_confidence() {
        let t = rec(
            cells!["Tm", "Wins", "Runs"],
            vec![cells!["NYY", "114", "965"], cells!["BOS", "92", "876"]],
        );
        let pay = infer_payroll_column(&t, Some(0)).unwrap();
        assert_eq!((pay.index, pay.confidence, pay.strategy), (2, Confidence::Low, "largest_max"));
    }

    #[test]
    fn no_numbers_no_column() {
        let t = rec(cells!["Tm", "Lg"], vec![cells!["NYY", "AL"], cells!["NYM", "NL"]]);
        assert_eq!(infer_payroll_column(&t, Some(0)), None);
    }
}
