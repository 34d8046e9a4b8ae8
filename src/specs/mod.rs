// src/specs/mod.rs
//! # Page specs
//!
//! What each source page looks like: its URL, which table ids carry which
//! logical table, how the payroll page splits into years. No fetching, no
//! persistence; `pipeline` decides when to call these and where results go.
//!
//! - `stats`: the yearly league page (batting, pitching, fielding, WAA, postseason).
//! - `payroll`: the single all-years payroll page, indexed by section heading.
//! - `overrides`: hand-checked payrolls for seasons the payroll page gets wrong.
pub mod overrides;
pub mod payroll;
pub mod stats;

use std::fmt;

/// Stable names for the per-period output files.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogicalTable {
    Batting,
    Pitching,
    Fielding,
    WaaPositions,
    Postseason,
    Payroll,
}

impl LogicalTable {
    /// Everything taken from the yearly stats page, in write order.
    pub const STATS: [LogicalTable; 5] = [
        LogicalTable::Batting,
        LogicalTable::Pitching,
        LogicalTable::Fielding,
        LogicalTable::WaaPositions,
        LogicalTable::Postseason,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LogicalTable::Batting => "batting",
            LogicalTable::Pitching => "pitching",
            LogicalTable::Fielding => "fielding",
            LogicalTable::WaaPositions => "waa_positions",
            LogicalTable::Postseason => "postseason",
            LogicalTable::Payroll => "payroll",
        }
    }

    /// File name without year or extension: `Batting` → `Batting_1998.csv`.
    pub fn file_stem(self) -> &'static str {
        match self {
            LogicalTable::Batting => "Batting",
            LogicalTable::Pitching => "Pitching",
            LogicalTable::Fielding => "Fielding",
            LogicalTable::WaaPositions => "WAA_Positions",
            LogicalTable::Postseason => "Postseason",
            LogicalTable::Payroll => "Salaries",
        }
    }

    /// Table ids to try on the stats page, best first. Empty for payroll.
    pub fn table_ids(self) -> &'static [&'static str] {
        match self {
            LogicalTable::Batting => &["teams_standard_batting", "teams_batting", "teams_batting_totals"],
            LogicalTable::Pitching => &["teams_standard_pitching", "teams_pitching", "teams_pitching_totals"],
            LogicalTable::Fielding => &["teams_standard_fielding", "teams_fielding", "teams_fielding_totals"],
            LogicalTable::WaaPositions => &["team_output", "teams_war_batting", "teams_pos_batting"],
            LogicalTable::Postseason => &["postseason"],
            LogicalTable::Payroll => &[],
        }
    }
}

impl fmt::Display for LogicalTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
