// src/core/currency.rs
//! Monetary text → whole currency units.
//!
//! Source pages mix `$71,860,921`, `71.86M`, `71860921` and `N/A` from row
//! to row, so anything unreadable is simply "no value" (`None`), never an
//! error and never zero.

const SENTINELS: &[&str] = &["", "-", "--", "n/a", "na", "nan", "none", "null"];

/// Parse one monetary token. Exact for decimal inputs: `"1.234567M"` is
/// 1 234 567, not a float approximation of it.
pub fn parse_amount(raw: &str) -> Option<i64> {
    let t = raw.trim();
    if SENTINELS.iter().any(|s| t.eq_ignore_ascii_case(s)) {
        return None;
    }

    let mut body: String = t
        .chars()
        .filter(|&c| !is_currency_symbol(c) && !matches!(c, ',' | ' ' | '\u{a0}'))
        .collect();

    let scale = match body.chars().last().map(|c| c.to_ascii_uppercase()) {
        Some('K') => 3,
        Some('M') => 6,
        Some('B') => 9,
        _ => 0,
    };
    if scale > 0 {
        body.pop();
    }
    if body.is_empty() {
        return None;
    }

    scaled_decimal(&body, scale).or_else(|| {
        // exponent notation and the like
        let v: f64 = body.parse().ok()?;
        let v = v * 10f64.powi(scale as i32);
        (v.is_finite() && v.abs() < i64::MAX as f64).then(|| v.trunc() as i64)
    })
}

/// `$`, `¢`, `£`, `¤`, `¥` and the Unicode Currency Symbols block (`€`, `₹`, ...).
fn is_currency_symbol(c: char) -> bool {
    matches!(c, '$' | '\u{a2}'..='\u{a5}' | '\u{20a0}'..='\u{20cf}')
}

/// `[-]digits[.digits]` times 10^scale, truncated toward zero.
fn scaled_decimal(s: &str, scale: u32) -> Option<i64> {
    let (neg, s) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };
    let (int, frac) = s.split_once('.').unwrap_or((s, ""));
    if int.is_empty() && frac.is_empty() {
        return None;
    }
    if !int.bytes().chain(frac.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut v: i64 = 0;
    for b in int.bytes() {
        v = v.checked_mul(10)?.checked_add((b - b'0') as i64)?;
    }
    let mut frac = frac.bytes();
    for _ in 0..scale {
        let d = frac.next().map_or(0, |b| (b - b'0') as i64);
        v = v.checked_mul(10)?.checked_add(d)?;
    }
    Some(if neg { -v } else { v })
}

/// Anything a table cell or curated constant can hold.
pub trait AmountSource {
    fn amount(&self) -> Option<i64>;
}

impl AmountSource for str {
    fn amount(&self) -> Option<i64> { parse_amount(self) }
}

impl AmountSource for String {
    fn amount(&self) -> Option<i64> { parse_amount(self) }
}

impl AmountSource for i64 {
    fn amount(&self) -> Option<i64> { Some(*self) }
}

impl AmountSource for f64 {
    fn amount(&self) -> Option<i64> {
        (self.is_finite() && self.abs() < i64::MAX as f64).then(|| self.trunc() as i64)
    }
}

impl<T: AmountSource> AmountSource for Option<T> {
    fn amount(&self) -> Option<i64> { self.as_ref().and_then(AmountSource::amount) }
}

impl<T: AmountSource + ?Sized> AmountSource for &T {
    fn amount(&self) -> Option<i64> { (**self).amount() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_amounts() {
        assert_eq!(parse_amount("$71,860,921"), Some(71_860_921));
        assert_eq!(parse_amount("$1,234,567"), Some(1_234_567));
        assert_eq!(parse_amount("1234567"), Some(1_234_567));
        assert_eq!(parse_amount("1.234567M"), Some(1_234_567));
        assert_eq!(parse_amount("$ 88.2 M"), Some(88_200_000));
        assert_eq!(parse_amount("250k"), Some(250_000));
        assert_eq!(parse_amount("1234567.89"), Some(1_234_567));
        assert_eq!(parse_amount("1.5e6"), Some(1_500_000));
    }

    #[test]
    fn any_currency_symbol_is_stripped() {
        assert_eq!(parse_amount("€1,250,000"), Some(1_250_000));
        assert_eq!(parse_amount("£3.5M"), Some(3_500_000));
        assert_eq!(parse_amount("¥ 900"), Some(900));
        assert_eq!(parse_amount("₹12K"), Some(12_000));
        assert_eq!(parse_amount("€"), None);
    }

    #[test]
    fn clean_integers_are_a_fixed_point() {
        for v in [0_i64, 1, 8_317_000, 88_180_712] {
            assert_eq!(parse_amount(&v.to_string()), Some(v));
        }
    }

    #[test]
    fn sentinels_and_junk_are_no_value() {
        for s in ["", "-", "N/A", "nan", "None", "  ", "$", "M", "abc", "12ab"] {
            assert_eq!(parse_amount(s), None, "{s:?}");
        }
    }

    #[test]
    fn sources() {
        assert_eq!("$5M".amount(), Some(5_000_000));
        assert_eq!(s!("7").amount(), Some(7));
        assert_eq!(3.9_f64.amount(), Some(3));
        assert_eq!(None::<String>.amount(), None);
        assert_eq!(Some(42_i64).amount(), Some(42));
    }
}
