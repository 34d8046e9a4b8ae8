// src/teams/mod.rs
//! The 30 current franchises and everything that maps older names onto them.

pub mod normalize;
pub mod variants;

use std::fmt;

pub use normalize::{Change, ChangeKind, Lexicon, Normalized, Normalizer, Resolution};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Team {
    Arizona,
    Athletics,
    Atlanta,
    Baltimore,
    Boston,
    ChicagoCubs,
    ChicagoWhiteSox,
    Cincinnati,
    Cleveland,
    Colorado,
    Detroit,
    Houston,
    KansasCity,
    AngelsLA,
    DodgersLA,
    Miami,
    Milwaukee,
    Minnesota,
    Mets,
    Yankees,
    Philadelphia,
    Pittsburgh,
    SanDiego,
    Seattle,
    SanFrancisco,
    StLouis,
    TampaBay,
    Texas,
    Toronto,
    Washington,
}

use Team::*;

impl Team {
    pub const ALL: [Team; 30] = [
        Arizona, Athletics, Atlanta, Baltimore, Boston, ChicagoCubs, ChicagoWhiteSox,
        Cincinnati, Cleveland, Colorado, Detroit, Houston, KansasCity, AngelsLA, DodgersLA,
        Miami, Milwaukee, Minnesota, Mets, Yankees, Philadelphia, Pittsburgh, SanDiego,
        Seattle, SanFrancisco, StLouis, TampaBay, Texas, Toronto, Washington,
    ];

    /// Current-era full name.
    pub fn name(self) -> &'static str {
        match self {
            Arizona => "Arizona Diamondbacks",
            Athletics => "Athletics",
            Atlanta => "Atlanta Braves",
            Baltimore => "Baltimore Orioles",
            Boston => "Boston Red Sox",
            ChicagoCubs => "Chicago Cubs",
            ChicagoWhiteSox => "Chicago White Sox",
            Cincinnati => "Cincinnati Reds",
            Cleveland => "Cleveland Guardians",
            Colorado => "Colorado Rockies",
            Detroit => "Detroit Tigers",
            Houston => "Houston Astros",
            KansasCity => "Kansas City Royals",
            AngelsLA => "Los Angeles Angels",
            DodgersLA => "Los Angeles Dodgers",
            Miami => "Miami Marlins",
            Milwaukee => "Milwaukee Brewers",
            Minnesota => "Minnesota Twins",
            Mets => "New York Mets",
            Yankees => "New York Yankees",
            Philadelphia => "Philadelphia Phillies",
            Pittsburgh => "Pittsburgh Pirates",
            SanDiego => "San Diego Padres",
            Seattle => "Seattle Mariners",
            SanFrancisco => "San Francisco Giants",
            StLouis => "St. Louis Cardinals",
            TampaBay => "Tampa Bay Rays",
            Texas => "Texas Rangers",
            Toronto => "Toronto Blue Jays",
            Washington => "Washington Nationals",
        }
    }

    /// Current-era three-letter code.
    pub fn abbr(self) -> &'static str {
        match self {
            Arizona => "ARI",
            Athletics => "ATH",
            Atlanta => "ATL",
            Baltimore => "BAL",
            Boston => "BOS",
            ChicagoCubs => "CHC",
            ChicagoWhiteSox => "CHW",
            Cincinnati => "CIN",
            Cleveland => "CLE",
            Colorado => "COL",
            Detroit => "DET",
            Houston => "HOU",
            KansasCity => "KCR",
            AngelsLA => "LAA",
            DodgersLA => "LAD",
            Miami => "MIA",
            Milwaukee => "MIL",
            Minnesota => "MIN",
            Mets => "NYM",
            Yankees => "NYY",
            Philadelphia => "PHI",
            Pittsburgh => "PIT",
            SanDiego => "SDP",
            Seattle => "SEA",
            SanFrancisco => "SFG",
            StLouis => "STL",
            TampaBay => "TBR",
            Texas => "TEX",
            Toronto => "TOR",
            Washington => "WSN",
        }
    }

    pub fn from_name(s: &str) -> Option<Team> {
        Team::ALL.into_iter().find(|t| t.name() == s)
    }

    pub fn from_abbr(s: &str) -> Option<Team> {
        Team::ALL.into_iter().find(|t| t.abbr() == s)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// `(abbr, name)` rows for `--list-teams`, alphabetical by code.
pub fn list_teams() -> Vec<(&'static str, &'static str)> {
    let mut v: Vec<_> = Team::ALL.iter().map(|t| (t.abbr(), t.name())).collect();
    v.sort_unstable();
    v
}
