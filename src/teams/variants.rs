// src/teams/variants.rs
//! Historical and alternate spellings seen on the source pages since 1998.
//! Add new rows here as older data turns them up.

use super::Team::{self, *};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VariantKind {
    /// Unmistakable on its own; also rewritten when glued to a number ("Montreal Expos12.5").
    Full,
    /// Only trusted as a whole cell ("Giants", "Los Angeles").
    Short,
}

#[derive(Clone, Copy, Debug)]
pub struct NameVariant {
    pub text: &'static str,
    pub team: Team,
    pub kind: VariantKind,
}

const fn full(text: &'static str, team: Team) -> NameVariant {
    NameVariant { text, team, kind: VariantKind::Full }
}

const fn short(text: &'static str, team: Team) -> NameVariant {
    NameVariant { text, team, kind: VariantKind::Short }
}

pub static NAMES: &[NameVariant] = &[
    // relocations and renames
    full("Oakland Athletics", Athletics),
    full("Oakland A's", Athletics),
    full("Oakland", Athletics),
    short("A's", Athletics),
    full("Cleveland Indians", Cleveland),
    short("Cleveland", Cleveland),
    short("Indians", Cleveland),
    short("Guardians", Cleveland),
    full("Florida Marlins", Miami),
    short("Florida", Miami),
    short("Marlins", Miami),
    full("Montreal Expos", Washington),
    short("Montreal", Washington),
    short("Expos", Washington),
    short("Washington", Washington),
    short("Nationals", Washington),
    full("Tampa Bay Devil Rays", TampaBay),
    short("Devil Rays", TampaBay),
    short("Tampa Bay", TampaBay),
    short("Rays", TampaBay),
    full("Anaheim Angels", AngelsLA),
    full("California Angels", AngelsLA),
    full("Los Angeles Angels of Anaheim", AngelsLA),
    short("Anaheim", AngelsLA),
    short("Angels", AngelsLA),

    // newspaper-style shorthands
    full("LA Angels", AngelsLA),
    full("LA Dodgers", DodgersLA),
    full("NY Mets", Mets),
    full("NY Yankees", Yankees),
    full("SF Giants", SanFrancisco),
    full("SD Padres", SanDiego),
    full("TB Rays", TampaBay),
    full("KC Royals", KansasCity),
    short("N.Y. Yankees", Yankees),
    short("N.Y. Mets", Mets),
    short("Ch. White Sox", ChicagoWhiteSox),
    short("St Louis Cardinals", StLouis),
    short("D-backs", Arizona),

    // city or nickname alone
    short("Yankees", Yankees),
    short("Mets", Mets),
    short("Los Angeles", DodgersLA),
    short("Dodgers", DodgersLA),
    short("San Francisco", SanFrancisco),
    short("Giants", SanFrancisco),
    short("San Diego", SanDiego),
    short("Padres", SanDiego),
    short("Boston", Boston),
    short("Red Sox", Boston),
    short("Cubs", ChicagoCubs),
    short("White Sox", ChicagoWhiteSox),
    short("Philadelphia", Philadelphia),
    short("Phillies", Philadelphia),
    short("Houston", Houston),
    short("Astros", Houston),
    short("Atlanta", Atlanta),
    short("Braves", Atlanta),
    short("St. Louis", StLouis),
    short("Cardinals", StLouis),
    short("Texas", Texas),
    short("Rangers", Texas),
    short("Seattle", Seattle),
    short("Mariners", Seattle),
    short("Detroit", Detroit),
    short("Tigers", Detroit),
    short("Baltimore", Baltimore),
    short("Orioles", Baltimore),
    short("Minnesota", Minnesota),
    short("Twins", Minnesota),
    short("Kansas City", KansasCity),
    short("Royals", KansasCity),
    short("Colorado", Colorado),
    short("Rockies", Colorado),
    short("Arizona", Arizona),
    short("Diamondbacks", Arizona),
    short("Cincinnati", Cincinnati),
    short("Reds", Cincinnati),
    short("Pittsburgh", Pittsburgh),
    short("Pirates", Pittsburgh),
    short("Milwaukee", Milwaukee),
    short("Brewers", Milwaukee),
    short("Toronto", Toronto),
    short("Blue Jays", Toronto),
];

/// Old or alternate codes. Safe to rewrite anywhere, including inside stat cells.
pub static ABBREVIATIONS: &[(&str, Team)] = &[
    ("OAK", Athletics),
    ("CWS", ChicagoWhiteSox),
    ("KC", KansasCity),
    ("KAN", KansasCity),
    ("SD", SanDiego),
    ("WAS", Washington),
    ("WSH", Washington),
    ("ANA", AngelsLA),
    ("CAL", AngelsLA),
    ("FLA", Miami),
    ("MON", Washington),
    ("TBD", TampaBay),
    ("CLV", Cleveland),
];

/// Codes that double as box-score columns (SF = sacrifice flies, TB = total bases).
/// Only ever applied to a dedicated team column.
pub static IDENTITY_ABBREVIATIONS: &[(&str, Team)] = &[
    ("SF", SanFrancisco),
    ("TB", TampaBay),
];
