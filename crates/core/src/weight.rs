use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A scanned item weight in the human unit (kg-scale), always non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Weight(Decimal);

impl Weight {
    /// Wrap an already-final value. Negative candidates are refused so a
    /// bad scan lands on the same path as an unparseable one.
    pub fn from_decimal(value: Decimal) -> Option<Self> {
        if value < Decimal::ZERO {
            return None;
        }
        Some(Weight(value))
    }

    /// Parse a raw scanner token carrying grams and convert to the human unit.
    pub fn from_grams(raw: &str) -> Option<Self> {
        let grams = Decimal::from_str(raw.trim()).ok()?;
        Self::from_decimal(grams / Decimal::from(1000))
    }

    /// Parse a raw token that already carries the final unit.
    pub fn from_units(raw: &str) -> Option<Self> {
        Self::from_decimal(Decimal::from_str(raw.trim()).ok()?)
    }

    pub fn zero() -> Self {
        Weight(Decimal::ZERO)
    }

    pub fn value(self) -> Decimal {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_grams_divides_by_thousand() {
        assert_eq!(Weight::from_grams("2500").unwrap().to_string(), "2.500");
        assert_eq!(Weight::from_grams("1500").unwrap().to_string(), "1.500");
    }

    #[test]
    fn from_units_keeps_value() {
        assert_eq!(Weight::from_units("42.5").unwrap().to_string(), "42.500");
        assert_eq!(Weight::from_units("10.360").unwrap().to_string(), "10.360");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(Weight::from_grams(" 1000 ").unwrap().to_string(), "1.000");
    }

    #[test]
    fn refuses_garbage() {
        assert!(Weight::from_grams("12x").is_none());
        assert!(Weight::from_units("").is_none());
    }

    #[test]
    fn refuses_negative() {
        assert!(Weight::from_grams("-1500").is_none());
        assert!(Weight::from_units("-0.5").is_none());
    }

    #[test]
    fn zero_is_a_valid_weight() {
        let w = Weight::from_grams("0").unwrap();
        assert!(w.is_zero());
        assert_eq!(w.to_string(), "0.000");
    }

    #[test]
    fn display_always_three_decimals() {
        assert_eq!(Weight::from_units("7").unwrap().to_string(), "7.000");
        assert_eq!(Weight::from_units("0.1234").unwrap().to_string(), "0.123");
    }
}
