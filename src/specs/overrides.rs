// src/specs/overrides.rs
//! Hand-checked opening-day payrolls for seasons where the payroll page's
//! tables cannot be read reliably. Consulted before any extraction; delete an
//! entry once the source is fixed.

use crate::teams::Team::{self, *};

pub fn payroll_override(year: u16) -> Option<&'static [(Team, i64)]> {
    match year {
        1998 => Some(PAYROLL_1998),
        1999 => Some(PAYROLL_1999),
        _ => None,
    }
}

static PAYROLL_1998: &[(Team, i64)] = &[
    (Baltimore, 71_860_921),
    (Yankees, 65_663_698),
    (DodgersLA, 62_806_667),
    (Atlanta, 61_708_000),
    (Texas, 60_519_595),
    (Cleveland, 59_543_165),
    (Boston, 59_497_000),
    (Mets, 58_660_665),
    (SanDiego, 53_066_166),
    (ChicagoCubs, 49_816_000),
    (SanFrancisco, 48_514_715),
    (AngelsLA, 48_389_000),
    (Houston, 48_304_000),
    (Colorado, 47_714_648),
    (StLouis, 44_090_854),
    (Seattle, 43_698_136),
    (KansasCity, 35_610_000),
    (ChicagoWhiteSox, 35_180_000),
    (Toronto, 34_158_500),
    (Milwaukee, 31_897_903),
    (Arizona, 31_614_500),
    (Philadelphia, 28_622_500),
    (TampaBay, 27_370_000),
    (Minnesota, 24_527_500),
    (Athletics, 22_463_500),
    (Cincinnati, 20_707_333),
    (Detroit, 19_237_500),
    (Miami, 15_141_000),
    (Pittsburgh, 13_695_000),
    (Washington, 8_317_000),
];

static PAYROLL_1999: &[(Team, i64)] = &[
    (Yankees, 88_180_712),
    (Texas, 81_576_598),
    (Atlanta, 74_890_000),
    (Cleveland, 73_278_458),
    (Baltimore, 72_198_363),
    (Boston, 71_725_000),
    (Mets, 71_506_427),
    (DodgersLA, 71_115_786),
    (Arizona, 70_496_000),
    (ChicagoCubs, 55_443_500),
    (Colorado, 54_442_505),
    (Houston, 54_339_000),
    (AngelsLA, 49_868_167),
    (Toronto, 48_455_333),
    (StLouis, 46_173_195),
    (SanFrancisco, 45_959_557),
    (SanDiego, 45_832_180),
    (Seattle, 44_396_336),
    (Milwaukee, 42_927_395),
    (Cincinnati, 42_142_761),
    (TampaBay, 38_027_500),
    (Detroit, 34_959_667),
    (Philadelphia, 30_568_167),
    (ChicagoWhiteSox, 24_535_000),
    (Athletics, 24_175_333),
    (Pittsburgh, 24_167_667),
    (KansasCity, 16_557_000),
    (Washington, 16_413_000),
    (Minnesota, 16_345_000),
    (Miami, 15_150_000),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn each_override_covers_every_franchise_once() {
        for year in [1998, 1999] {
            let rows = payroll_override(year).unwrap();
            let teams: HashSet<Team> = rows.iter().map(|(t, _)| *t).collect();
            assert_eq!(teams.len(), 30, "{year}");
            assert!(rows.iter().all(|(_, v)| *v > 0));
            assert!(rows.windows(2).all(|w| w[0].1 >= w[1].1), "{year} not descending");
        }
        assert!(payroll_override(2000).is_none());
    }
}
