// src/teams/normalize.rs
//! Entity normalizer.
//!
//! Lookup order for a name: current spelling, then a known historical
//! variant, then a case-insensitive containment match. Nothing is ever
//! dropped: an input no table knows comes back unchanged and is reported as
//! unresolved so the caller can warn about it.

use std::borrow::Cow;
use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::variants::{self, NameVariant, VariantKind};
use super::Team;
use crate::core::sanitize::strip_rank_prefix;
use crate::table::StructuredRecord;

/// Columns whose cells are team identities rather than stats.
pub const IDENTITY_HEADERS: &[&str] = &["Tm", "Team", "team", "Name"];

/// Containment matches the other way round ("Yank" inside "new york yankees")
/// need at least this many characters.
const MIN_PARTIAL_LEN: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Canonical(Team),
    Variant(Team),
    Fuzzy(Team),
    Unresolved,
}

impl Resolution {
    pub fn team(self) -> Option<Team> {
        match self {
            Resolution::Canonical(t) | Resolution::Variant(t) | Resolution::Fuzzy(t) => Some(t),
            Resolution::Unresolved => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Normalized {
    pub value: String,
    pub resolution: Resolution,
}

impl Normalized {
    pub fn team(&self) -> Option<Team> { self.resolution.team() }
    pub fn is_resolved(&self) -> bool { self.team().is_some() }
}

/* ---------------- lookup tables ---------------- */

/// Immutable lookup tables. Built once, then only read.
pub struct Lexicon {
    names: HashMap<&'static str, Team>,
    abbrs: HashMap<&'static str, Team>,
    identity_abbrs: HashMap<&'static str, Team>,
    /// Lowercased spellings, longest first then lexical.
    fuzzy_keys: Vec<(String, Team)>,
    /// `(token, replacement)`, longest token first.
    embedded: Vec<(&'static str, &'static str)>,
}

static STANDARD: LazyLock<Lexicon> = LazyLock::new(|| {
    Lexicon::new(variants::NAMES, variants::ABBREVIATIONS, variants::IDENTITY_ABBREVIATIONS)
});

impl Lexicon {
    pub fn new(
        names: &[NameVariant],
        abbrs: &[(&'static str, Team)],
        identity_abbrs: &[(&'static str, Team)],
    ) -> Self {
        let mut fuzzy_keys: Vec<(String, Team)> = Team::ALL
            .iter()
            .map(|t| (t.name().to_lowercase(), *t))
            .chain(names.iter().map(|v| (v.text.to_lowercase(), v.team)))
            .collect();
        fuzzy_keys.sort_by(|a, b| (Reverse(a.0.len()), &a.0).cmp(&(Reverse(b.0.len()), &b.0)));
        fuzzy_keys.dedup_by(|a, b| a.0 == b.0);

        let mut embedded: Vec<(&'static str, &'static str)> = names
            .iter()
            .filter(|v| v.kind == VariantKind::Full && v.text != v.team.name())
            .map(|v| (v.text, v.team.name()))
            .chain(abbrs.iter().map(|(a, t)| (*a, t.abbr())))
            .collect();
        embedded.sort_by(|a, b| (Reverse(a.0.len()), a.0).cmp(&(Reverse(b.0.len()), b.0)));

        Self {
            names: names.iter().map(|v| (v.text, v.team)).collect(),
            abbrs: abbrs.iter().copied().collect(),
            identity_abbrs: identity_abbrs.iter().copied().collect(),
            fuzzy_keys,
            embedded,
        }
    }

    /// The process-wide tables for the MLB source pages.
    pub fn standard() -> &'static Lexicon { &STANDARD }
}

/* ---------------- strategies ---------------- */

type NameStrategy = fn(&Lexicon, &str) -> Option<Resolution>;

const NAME_STRATEGIES: &[(&str, NameStrategy)] = &[
    ("canonical", by_canonical),
    ("variant", by_variant),
    ("fuzzy", by_containment),
];

fn by_canonical(_: &Lexicon, s: &str) -> Option<Resolution> {
    Team::from_name(s).map(Resolution::Canonical)
}

fn by_variant(lex: &Lexicon, s: &str) -> Option<Resolution> {
    lex.names.get(s).copied().map(Resolution::Variant)
}

/// Key inside input: longest key wins (ties lexical). Input inside key: only
/// when every key containing it belongs to one franchise.
fn by_containment(lex: &Lexicon, s: &str) -> Option<Resolution> {
    let lc = s.to_lowercase();
    if lc.is_empty() { return None; }

    if let Some((_, t)) = lex.fuzzy_keys.iter().find(|(k, _)| lc.contains(k.as_str())) {
        return Some(Resolution::Fuzzy(*t));
    }

    if lc.chars().count() < MIN_PARTIAL_LEN { return None; }
    let owners: HashSet<Team> = lex
        .fuzzy_keys
        .iter()
        .filter(|(k, _)| k.contains(lc.as_str()))
        .map(|(_, t)| *t)
        .collect();
    match owners.len() {
        1 => owners.into_iter().next().map(Resolution::Fuzzy),
        _ => None,
    }
}

fn boundary_after(rest: &str) -> bool {
    rest.chars().next().map_or(true, |c| c.is_ascii_digit() || c.is_ascii_punctuation())
}

/* ---------------- normalizer ---------------- */

#[derive(Clone, Copy)]
pub struct Normalizer<'a> {
    lex: &'a Lexicon,
}

impl Default for Normalizer<'static> {
    fn default() -> Self { Self::new(Lexicon::standard()) }
}

impl<'a> Normalizer<'a> {
    pub fn new(lex: &'a Lexicon) -> Self { Self { lex } }

    /// Full team name → current full name.
    pub fn normalize_name(&self, raw: &str) -> Normalized {
        let trimmed = raw.trim();
        let s = strip_rank_prefix(trimmed);
        for (_, strategy) in NAME_STRATEGIES {
            if let Some(res) = strategy(self.lex, s) {
                if let Some(t) = res.team() {
                    return Normalized { value: s!(t.name()), resolution: res };
                }
            }
        }
        Normalized { value: s!(trimmed), resolution: Resolution::Unresolved }
    }

    /// Team code → current code. `SF`/`TB` are not touched here.
    pub fn normalize_abbreviation(&self, raw: &str) -> Normalized {
        let code = raw.trim().to_ascii_uppercase();
        self.lookup_code(&code, false)
            .map(|res| Normalized { value: s!(res.team().map_or("", Team::abbr)), resolution: res })
            .unwrap_or_else(|| Normalized { value: s!(raw.trim()), resolution: Resolution::Unresolved })
    }

    /// A dedicated team cell: a name, or failing that a code (including the
    /// ambiguous `SF`/`TB`). Codes stay codes.
    pub fn normalize_identity(&self, raw: &str) -> Normalized {
        let by_name = self.normalize_name(raw);
        if by_name.is_resolved() {
            return by_name;
        }
        let code = strip_rank_prefix(raw).to_ascii_uppercase();
        match self.lookup_code(&code, true).and_then(|r| r.team().map(|t| (r, t))) {
            Some((resolution, t)) => Normalized { value: s!(t.abbr()), resolution },
            None => by_name,
        }
    }

    fn lookup_code(&self, code: &str, identity: bool) -> Option<Resolution> {
        if let Some(t) = Team::from_abbr(code) {
            return Some(Resolution::Canonical(t));
        }
        self.lex
            .abbrs
            .get(code)
            .or_else(|| identity.then(|| self.lex.identity_abbrs.get(code)).flatten())
            .copied()
            .map(Resolution::Variant)
    }

    /// Rewrite identity tokens glued to other content: `"OAK4.0"` → `"ATH4.0"`.
    /// A token must start a word and be followed by a digit, punctuation or
    /// the end of the string. Longer tokens are tried first.
    pub fn normalize_embedded<'s>(&self, s: &'s str) -> Cow<'s, str> {
        let mut out: Option<String> = None;
        let mut copied = 0;
        let mut prev: Option<char> = None;

        let mut i = 0;
        while i < s.len() {
            let rest = &s[i..];
            let Some(ch) = rest.chars().next() else { break };

            let word_start = prev.is_none_or(|p| !p.is_alphanumeric());
            if word_start {
                let hit = self
                    .lex
                    .embedded
                    .iter()
                    .find(|(tok, _)| rest.starts_with(tok) && boundary_after(&rest[tok.len()..]));
                if let Some((tok, rep)) = hit {
                    let o = out.get_or_insert_with(|| String::with_capacity(s.len()));
                    o.push_str(&s[copied..i]);
                    o.push_str(rep);
                    i += tok.len();
                    copied = i;
                    prev = tok.chars().next_back();
                    continue;
                }
            }

            prev = Some(ch);
            i += ch.len_utf8();
        }

        match out {
            None => Cow::Borrowed(s),
            Some(mut o) => {
                o.push_str(&s[copied..]);
                Cow::Owned(o)
            }
        }
    }

    /// Normalize a whole stats table: identity columns by name/code, every
    /// other cell and every header by embedded substitution.
    pub fn normalize_record(&self, rec: &StructuredRecord) -> NormalizedRecord {
        let mut out = rec.clone();
        let mut changes = Vec::new();
        let mut unresolved: Vec<String> = Vec::new();

        for (c, header) in rec.headers.iter().enumerate() {
            let identity = IDENTITY_HEADERS.contains(&header.as_str());
            for (r, row) in out.rows.iter_mut().enumerate() {
                let Some(cell) = row.get_mut(c) else { continue };
                if cell.is_empty() { continue; }

                let (new, kind) = if identity {
                    let n = self.normalize_identity(cell);
                    if !n.is_resolved() && !unresolved.contains(&n.value) {
                        unresolved.push(n.value.clone());
                    }
                    (n.value, ChangeKind::TeamName)
                } else {
                    (self.normalize_embedded(cell).into_owned(), ChangeKind::Embedded)
                };

                if new != *cell {
                    changes.push(Change {
                        column: header.clone(),
                        row: Some(r),
                        old: std::mem::replace(cell, new.clone()),
                        new,
                        kind,
                    });
                }
            }
        }

        for h in out.headers.iter_mut() {
            if let Cow::Owned(new) = self.normalize_embedded(h) {
                changes.push(Change {
                    column: h.clone(),
                    row: None,
                    old: std::mem::replace(h, new.clone()),
                    new,
                    kind: ChangeKind::Header,
                });
            }
        }

        NormalizedRecord { record: out, changes, unresolved }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    TeamName,
    Embedded,
    Header,
}

/// One rewritten cell (`row: None` for a header).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Change {
    pub column: String,
    pub row: Option<usize>,
    pub old: String,
    pub new: String,
    pub kind: ChangeKind,
}

#[derive(Clone, Debug)]
pub struct NormalizedRecord {
    pub record: StructuredRecord,
    pub changes: Vec<Change>,
    pub unresolved: Vec<String>,
}
