// src/table/materialize.rs
//! Raw table fragment → `StructuredRecord`.
//!
//! Handles `colspan`/`rowspan`, multi-row headers (flattened per column),
//! header rows repeated inside the body, and league/average summary rows.

use scraper::{ElementRef, Html};

use super::StructuredRecord;
use crate::core::html::{child_elements, is_tag, owning_table, span_attr, text_of};
use crate::core::sanitize::contains_any_ci;

/// First-column markers of summary rows that are not entities.
const AGGREGATE_MARKERS: &[&str] = &["average", "avg", "league"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Materialized {
    Table(StructuredRecord),
    Skipped(SkipReason),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The fragment holds no `<table>` element.
    NoTable,
    /// A table with no cell-bearing rows.
    NoRows,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            SkipReason::NoTable => "no <table> element",
            SkipReason::NoRows => "no rows with cells",
        })
    }
}

impl Materialized {
    pub fn into_table(self) -> Option<StructuredRecord> {
        match self {
            Materialized::Table(t) => Some(t),
            Materialized::Skipped(_) => None,
        }
    }
}

struct Line {
    cells: Vec<String>,
    header: bool,
}

pub fn materialize(fragment: &str) -> Materialized {
    let doc = Html::parse_fragment(fragment);
    let Some(table) = doc
        .tree
        .root()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| is_tag(*e, "table"))
    else {
        return Materialized::Skipped(SkipReason::NoTable);
    };

    let lines = grid(table);
    if lines.is_empty() {
        return Materialized::Skipped(SkipReason::NoRows);
    }
    Materialized::Table(shape(lines))
}

/// Expand spans into a rectangular-ish grid of text, one `Line` per `<tr>`.
fn grid(table: ElementRef<'_>) -> Vec<Line> {
    let mut lines = Vec::new();
    // per column: (rows still covered, text)
    let mut carry: Vec<(usize, String)> = Vec::new();

    let rows = table
        .descendants()
        .filter_map(ElementRef::wrap)
        .filter(|e| is_tag(*e, "tr"))
        .filter(|tr| owning_table(*tr).map(|t| t.id()) == Some(table.id()));

    for tr in rows {
        let cells: Vec<ElementRef<'_>> = child_elements(tr)
            .filter(|c| is_tag(*c, "td") || is_tag(*c, "th"))
            .collect();
        if cells.is_empty() {
            continue;
        }

        let in_thead = tr
            .parent()
            .and_then(ElementRef::wrap)
            .is_some_and(|p| is_tag(p, "thead"));
        let all_th = cells.iter().all(|c| is_tag(*c, "th"));

        let mut out: Vec<String> = Vec::new();
        let mut col = 0;
        let take_carry = |col: usize, out: &mut Vec<String>, carry: &mut Vec<(usize, String)>| {
            match carry.get_mut(col) {
                Some((left, text)) if *left > 0 => {
                    *left -= 1;
                    out.push(text.clone());
                    true
                }
                _ => false,
            }
        };

        for cell in cells {
            while take_carry(col, &mut out, &mut carry) {
                col += 1;
            }
            let text = text_of(cell);
            let rowspan = span_attr(cell, "rowspan");
            for _ in 0..span_attr(cell, "colspan") {
                if rowspan > 1 {
                    if carry.len() <= col {
                        carry.resize(col + 1, (0, s!()));
                    }
                    carry[col] = (rowspan - 1, text.clone());
                }
                out.push(text.clone());
                col += 1;
            }
        }
        while take_carry(col, &mut out, &mut carry) {
            col += 1;
        }

        lines.push(Line { cells: out, header: in_thead || all_th });
    }
    lines
}

fn shape(mut lines: Vec<Line>) -> StructuredRecord {
    let n_header = {
        let thead = lines.iter().take_while(|l| l.header).count();
        if thead > 0 && thead < lines.len() {
            thead
        } else if lines.len() > 1 {
            1
        } else {
            0
        }
    };

    if n_header == 0 {
        // a lone row: keep its text as one column
        let joined = lines
            .pop()
            .map(|l| l.cells.into_iter().filter(|c| !c.is_empty()).collect::<Vec<_>>().join(" "))
            .unwrap_or_default();
        return StructuredRecord { headers: cells!["0"], rows: vec![vec![joined]] };
    }

    let mut body = lines.split_off(n_header);
    // header rows repeated inside the body, unless every body row looks like one
    if body.iter().any(|l| !l.header) {
        body.retain(|l| !l.header);
    }
    let width = lines.iter().chain(&body).map(|l| l.cells.len()).max().unwrap_or(0);
    let headers = flatten_headers(&lines, width);

    let mut rows: Vec<Vec<String>> = body
        .into_iter()
        .map(|l| {
            let mut cells = l.cells;
            cells.resize(width, s!());
            cells
        })
        .collect();

    let first_label = headers.first().cloned().unwrap_or_default();
    rows.retain(|r| {
        let first = r.first().map_or("", String::as_str);
        first != first_label
            && !r.iter().all(|c| c.is_empty())
            && !contains_any_ci(first, AGGREGATE_MARKERS)
    });

    StructuredRecord { headers, rows }
}

/// Join each column's non-empty header levels with a space. A level equal to
/// the one above it (a `rowspan` carried down) is only kept once.
fn flatten_headers(levels: &[Line], width: usize) -> Vec<String> {
    (0..width)
        .map(|j| {
            let mut parts: Vec<&str> = Vec::new();
            for level in levels {
                let Some(cell) = level.cells.get(j) else { continue };
                let cell = cell.trim();
                if !cell.is_empty() && parts.last() != Some(&cell) {
                    parts.push(cell);
                }
            }
            if parts.is_empty() { j.to_string() } else { parts.join(" ") }
        })
        .collect()
}
