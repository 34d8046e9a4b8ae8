// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::consts::*;
use crate::csv::Delim;
use crate::error::ConfigError;

/// Which page family a run pulls from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    /// One league page per year: batting, pitching, fielding, ...
    Stats,
    /// One page holding every year's payroll table.
    Payroll,
}

impl Source {
    pub const ALL: [Source; 2] = [Source::Stats, Source::Payroll];

    pub fn as_str(self) -> &'static str {
        match self {
            Source::Stats => "stats",
            Source::Payroll => "payroll",
        }
    }
}

/// Everything the outer driver exposes. Loaded from YAML (all keys optional),
/// then overridden field by field from the command line.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunOptions {
    #[serde(deserialize_with = "de_periods")]
    pub periods: Vec<u16>,
    pub sources: Vec<Source>,
    pub period_budget_secs: u64,
    pub nav_timeout_secs: u64,
    pub out_root: PathBuf,
    /// Only meaningful for a browser-backed fetcher; the HTTP one is always headless.
    pub headless: bool,
    pub format: Delim,
    pub pause_between_periods_ms: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            periods: (FIRST_PERIOD..=LAST_PERIOD).collect(),
            sources: Source::ALL.to_vec(),
            period_budget_secs: PERIOD_BUDGET_SECS,
            nav_timeout_secs: NAV_TIMEOUT_SECS,
            out_root: PathBuf::from(DEFAULT_OUT_ROOT),
            headless: true,
            format: Delim::Csv,
            pause_between_periods_ms: PAUSE_BETWEEN_PERIODS_MS,
        }
    }
}

impl RunOptions {
    /// Read a YAML options file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let opts: RunOptions = serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        opts.validate()
    }

    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.period_budget_secs < DISCOVERY_FLOOR_SECS {
            return Err(ConfigError::InvalidBudget {
                got: self.period_budget_secs,
                floor: DISCOVERY_FLOOR_SECS,
            });
        }
        if self.periods.iter().any(|p| !(MIN_SUPPORTED_PERIOD..=MAX_SUPPORTED_PERIOD).contains(p)) {
            return Err(ConfigError::InvalidPeriods(format!("{:?}", self.periods)));
        }
        self.periods.sort_unstable();
        self.periods.dedup();
        self.sources.sort_unstable();
        self.sources.dedup();
        Ok(self)
    }

    pub fn wants(&self, source: Source) -> bool {
        self.sources.contains(&source)
    }

    pub fn period_budget(&self) -> Duration {
        Duration::from_secs(self.period_budget_secs)
    }

    pub fn nav_timeout(&self) -> Duration {
        Duration::from_secs(self.nav_timeout_secs)
    }

    pub fn pause_between_periods(&self) -> Duration {
        Duration::from_millis(self.pause_between_periods_ms)
    }
}

/// "1998-2003,2010" → [1998, 1999, 2000, 2001, 2002, 2003, 2010].
/// Sorted, deduplicated, bounded to the supported window.
pub fn parse_periods(s: &str) -> Result<Vec<u16>, ConfigError> {
    let bad = || ConfigError::InvalidPeriods(s.to_string());
    let in_window = |v: u16| (MIN_SUPPORTED_PERIOD..=MAX_SUPPORTED_PERIOD).contains(&v);

    let mut out = Vec::new();
    for part in s.split(',') {
        let part = part.trim();
        if part.is_empty() { continue; }
        if let Some((a, b)) = part.split_once('-') {
            let a: u16 = a.trim().parse().map_err(|_| bad())?;
            let b: u16 = b.trim().parse().map_err(|_| bad())?;
            if a > b || !in_window(a) || !in_window(b) { return Err(bad()); }
            out.extend(a..=b);
        } else {
            let v: u16 = part.parse().map_err(|_| bad())?;
            if !in_window(v) { return Err(bad()); }
            out.push(v);
        }
    }
    if out.is_empty() { return Err(bad()); }
    out.sort_unstable();
    out.dedup();
    Ok(out)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PeriodSpec {
    List(Vec<u16>),
    Expr(String),
}

fn de_periods<'de, D>(de: D) -> Result<Vec<u16>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match PeriodSpec::deserialize(de)? {
        PeriodSpec::List(v) => Ok(v),
        PeriodSpec::Expr(s) => parse_periods(&s).map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn periods_accept_ranges_and_singles() {
        assert_eq!(parse_periods("2001, 1998-2000,2001").unwrap(), vec![1998, 1999, 2000, 2001]);
        assert!(parse_periods("2003-1998").is_err());
        assert!(parse_periods("abc").is_err());
        assert!(parse_periods("").is_err());
        assert!(parse_periods("1066").is_err());
    }

    #[test]
    fn yaml_overrides_only_given_keys() {
        let opts: RunOptions = serde_yaml::from_str("periods: \"1998-1999\"\nheadless: false\n").unwrap();
        assert_eq!(opts.periods, vec![1998, 1999]);
        assert!(!opts.headless);
        assert_eq!(opts.period_budget_secs, PERIOD_BUDGET_SECS);
        assert_eq!(opts.sources, Source::ALL.to_vec());

        let opts: RunOptions = serde_yaml::from_str("periods: [2005, 2004]\nsources: [payroll]\n").unwrap();
        let opts = opts.validate().unwrap();
        assert_eq!(opts.periods, vec![2004, 2005]);
        assert!(opts.wants(Source::Payroll));
        assert!(!opts.wants(Source::Stats));
    }

    #[test]
    fn budget_below_floor_is_rejected() {
        let opts = RunOptions { period_budget_secs: 3, ..RunOptions::default() };
        assert!(matches!(opts.validate(), Err(ConfigError::InvalidBudget { .. })));
    }
}
