// src/table/discover.rs
//! Bounded table discovery.
//!
//! Visible `<table id=…>` elements first, then tables hidden inside HTML
//! comments (reference sites ship secondary tables that way). The clock is
//! checked before every table and every comment; once the budget is spent the
//! call returns what it has. It never fails.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use scraper::{ElementRef, Html, Node};
use tracing::{debug, warn};

use super::{Origin, RawTable};
use crate::config::consts::{DISCOVERY_CAP_SECS, MAX_COMMENT_BLOCKS};
use crate::core::html::{is_tag, mentions_table};

#[derive(Clone, Copy, Debug)]
pub struct DiscoveryLimits {
    pub budget: Duration,
    /// Comment nodes inspected at most, whether or not they hold a table.
    pub max_comments: usize,
}

impl Default for DiscoveryLimits {
    fn default() -> Self {
        Self { budget: Duration::from_secs(DISCOVERY_CAP_SECS), max_comments: MAX_COMMENT_BLOCKS }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pass {
    Visible,
    Comments,
}

/// Why discovery stopped before looking at everything.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cutoff {
    Budget(Pass),
    CommentCap(usize),
}

impl std::fmt::Display for Cutoff {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cutoff::Budget(Pass::Visible) => f.write_str("time budget spent during visible pass"),
            Cutoff::Budget(Pass::Comments) => f.write_str("time budget spent during comment scan"),
            Cutoff::CommentCap(n) => write!(f, "stopped after {n} comment blocks"),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Discovery {
    /// Document order, visible tables before comment tables.
    pub tables: Vec<RawTable>,
    pub cutoff: Option<Cutoff>,
}

impl Discovery {
    pub fn get(&self, id: &str) -> Option<&RawTable> {
        self.tables.iter().find(|t| t.id == id)
    }

    pub fn ids(&self) -> Vec<String> {
        self.tables.iter().map(|t| t.id.clone()).collect()
    }
}

pub fn discover_tables(html: &str, limits: &DiscoveryLimits) -> Discovery {
    discover_tables_with(html, limits, |_| {})
}

/// Same as [`discover_tables`], calling `on_found` after each table is kept.
pub fn discover_tables_with<F>(html: &str, limits: &DiscoveryLimits, mut on_found: F) -> Discovery
where
    F: FnMut(&RawTable),
{
    let started = Instant::now();
    let over = || started.elapsed() >= limits.budget;

    let mut out = Discovery::default();
    let mut seen: HashSet<String> = HashSet::new();

    if over() {
        out.cutoff = Some(Cutoff::Budget(Pass::Visible));
        return out;
    }
    let doc = Html::parse_document(html);

    /* ---- visible ---- */
    for el in doc.tree.root().descendants().filter_map(ElementRef::wrap) {
        if !is_tag(el, "table") { continue; }
        let Some(id) = el.value().attr("id").filter(|id| !id.is_empty()) else { continue };
        if over() {
            warn!(found = out.tables.len(), "discovery budget spent in visible pass");
            out.cutoff = Some(Cutoff::Budget(Pass::Visible));
            return out;
        }
        if seen.insert(id.to_string()) {
            let t = RawTable { id: id.to_string(), origin: Origin::Visible, html: el.html() };
            on_found(&t);
            out.tables.push(t);
        }
    }
    debug!(visible = out.tables.len(), "visible tables");

    /* ---- comments ---- */
    let mut inspected = 0usize;
    for node in doc.tree.root().descendants() {
        let Node::Comment(comment) = node.value() else { continue };
        if over() {
            warn!(found = out.tables.len(), inspected, "discovery budget spent in comment scan");
            out.cutoff = Some(Cutoff::Budget(Pass::Comments));
            return out;
        }
        if inspected == limits.max_comments {
            debug!(inspected, "comment cap reached");
            out.cutoff = Some(Cutoff::CommentCap(inspected));
            break;
        }
        inspected += 1;

        let text: &str = comment;
        if !mentions_table(text) { continue; }

        let frag = Html::parse_fragment(text);
        for el in frag.tree.root().descendants().filter_map(ElementRef::wrap) {
            if !is_tag(el, "table") { continue; }
            let Some(id) = el.value().attr("id").filter(|id| !id.is_empty()) else { continue };
            if seen.insert(id.to_string()) {
                let t = RawTable { id: id.to_string(), origin: Origin::Comment, html: el.html() };
                on_found(&t);
                out.tables.push(t);
            }
        }
    }

    debug!(total = out.tables.len(), inspected, elapsed_ms = started.elapsed().as_millis() as u64, "discovery done");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
        <table id="teams_standard_batting"><tr><th>Tm</th></tr><tr><td>NYY</td></tr></table>
        <table><tr><td>no id</td></tr></table>
        <!-- just a note -->
        <div><!--
            <table id="teams_standard_pitching"><tr><th>Tm</th></tr><tr><td>NYY</td></tr></table>
            <table id="teams_standard_batting"><tr><th>stale</th></tr></table>
        --></div>
    </body></html>"#;

    #[test]
    fn visible_then_comments_first_found_wins() {
        let d = discover_tables(PAGE, &DiscoveryLimits::default());
        assert_eq!(d.ids(), vec![s!("teams_standard_batting"), s!("teams_standard_pitching")]);
        assert_eq!(d.tables[0].origin, Origin::Visible);
        assert_eq!(d.tables[1].origin, Origin::Comment);
        assert!(!d.get("teams_standard_batting").unwrap().html.contains("stale"));
        assert_eq!(d.cutoff, None);
    }

    #[test]
    fn comment_cap_bounds_the_scan() {
        let limits = DiscoveryLimits { max_comments: 1, ..DiscoveryLimits::default() };
        let d = discover_tables(PAGE, &limits);
        assert_eq!(d.ids(), vec![s!("teams_standard_batting")]);
        assert_eq!(d.cutoff, Some(Cutoff::CommentCap(1)));
    }

    #[test]
    fn zero_budget_returns_empty() {
        let limits = DiscoveryLimits { budget: Duration::ZERO, ..DiscoveryLimits::default() };
        let d = discover_tables(PAGE, &limits);
        assert!(d.tables.is_empty());
        assert_eq!(d.cutoff, Some(Cutoff::Budget(Pass::Visible)));
    }
}
