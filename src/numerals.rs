//! Localized digit rendering
//!
//! Questions, UFO labels and level fallbacks are shown in the player's numeral
//! system. Only the ten decimal digits are substituted; the sign is untouched.

use serde::{Deserialize, Serialize};

/// Digit glyph sets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumeralSystem {
    /// 0123456789
    Western,
    /// ٠١٢٣٤٥٦٧٨٩
    #[default]
    ArabicIndic,
    /// ۰۱۲۳۴۵۶۷۸۹
    Persian,
}

impl NumeralSystem {
    fn digits(&self) -> [char; 10] {
        match self {
            NumeralSystem::Western => ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'],
            NumeralSystem::ArabicIndic => ['٠', '١', '٢', '٣', '٤', '٥', '٦', '٧', '٨', '٩'],
            NumeralSystem::Persian => ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'],
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NumeralSystem::Western => "Western",
            NumeralSystem::ArabicIndic => "Arabic-Indic",
            NumeralSystem::Persian => "Persian",
        }
    }

    /// Format an integer with this system's digits
    pub fn format(&self, n: i64) -> String {
        format(n, *self)
    }
}

/// Render `n` in decimal, replacing each ASCII digit with the glyph of `system`
pub fn format(n: i64, system: NumeralSystem) -> String {
    let digits = system.digits();
    n.to_string()
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => digits[d as usize],
            None => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_western_is_identity() {
        assert_eq!(format(1234567890, NumeralSystem::Western), "1234567890");
        assert_eq!(format(-42, NumeralSystem::Western), "-42");
    }

    #[test]
    fn test_arabic_indic_digits() {
        assert_eq!(format(0, NumeralSystem::ArabicIndic), "٠");
        assert_eq!(format(1234567890, NumeralSystem::ArabicIndic), "١٢٣٤٥٦٧٨٩٠");
    }

    #[test]
    fn test_sign_preserved() {
        assert_eq!(format(-17, NumeralSystem::ArabicIndic), "-١٧");
        assert_eq!(NumeralSystem::Persian.format(-305), "-۳۰۵");
    }

    #[test]
    fn test_extremes_are_total() {
        let s = format(i64::MIN, NumeralSystem::ArabicIndic);
        assert!(s.starts_with('-'));
        assert_eq!(s.chars().count(), i64::MIN.to_string().len());
    }
}
