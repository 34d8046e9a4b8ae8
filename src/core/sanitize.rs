// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;

static RANK_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+\.?\s*").unwrap());

static YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(19\d{2}|20[0-2]\d)").unwrap());

/// Collapse every whitespace run (including NBSP) to one space and trim.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// "1. New York Yankees" → "New York Yankees", "12 Boston" → "Boston".
/// A value that is nothing but a rank keeps its original text.
pub fn strip_rank_prefix(s: &str) -> &str {
    let t = s.trim();
    match RANK_PREFIX.find(t) {
        Some(m) if m.end() < t.len() => t[m.end()..].trim(),
        _ => t,
    }
}

/// First plausible season year (1900-2029) appearing in `s`.
pub fn find_year(s: &str) -> Option<u16> {
    YEAR.find(s).and_then(|m| m.as_str().parse().ok())
}

/// ASCII case-insensitive substring test.
pub fn contains_ci(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() { return true; }
    haystack.to_ascii_lowercase().contains(&needle.to_ascii_lowercase())
}

pub fn contains_any_ci(haystack: &str, needles: &[&str]) -> bool {
    let lc = haystack.to_ascii_lowercase();
    needles.iter().any(|n| lc.contains(&n.to_ascii_lowercase()))
}
