//! Amount type for expense values
//!
//! Expenses are entered as free-form decimal text and kept as a plain `f64`.
//! `Amount::parse` is the only constructor that enforces the positivity rule;
//! deserialized values are trusted as written by the store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Add;

/// A positive monetary amount of a single expense
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Wrap a raw value without validation
    pub const fn new(value: f64) -> Self {
        Self(value)
    }

    /// Zero, the identity for sums
    pub const fn zero() -> Self {
        Self(0.0)
    }

    /// Get the raw value
    pub const fn value(&self) -> f64 {
        self.0
    }

    /// Parse user-entered text into a strictly positive amount
    ///
    /// Surrounding whitespace is ignored. Accepts anything `f64` parses
    /// ("12", "12.5", "1e3"), then rejects NaN, infinities, zero and
    /// negative values.
    pub fn parse(s: &str) -> Result<Self, AmountParseError> {
        let trimmed = s.trim();
        let value: f64 = trimmed
            .parse()
            .map_err(|_| AmountParseError::NotANumber(trimmed.to_string()))?;

        if !value.is_finite() {
            return Err(AmountParseError::NotANumber(trimmed.to_string()));
        }
        if value <= 0.0 {
            return Err(AmountParseError::NotPositive(value));
        }

        Ok(Self(value))
    }

    /// Text that `parse` turns back into the same amount
    pub fn to_input_text(&self) -> String {
        self.0.to_string()
    }

    /// Format with a currency symbol and two decimals
    pub fn format_with_symbol(&self, symbol: &str) -> String {
        format!("{}{:.2}", symbol, self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl Add for Amount {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl std::iter::Sum for Amount {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Amount::zero(), |acc, a| acc + a)
    }
}

/// Error type for amount parsing
#[derive(Debug, Clone, PartialEq)]
pub enum AmountParseError {
    NotANumber(String),
    NotPositive(f64),
}

impl fmt::Display for AmountParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber(s) => write!(f, "Not a number: '{}'", s),
            Self::NotPositive(v) => write!(f, "Amount must be greater than zero, got {}", v),
        }
    }
}

impl std::error::Error for AmountParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        assert_eq!(Amount::parse("12").unwrap().value(), 12.0);
        assert_eq!(Amount::parse("12.5").unwrap().value(), 12.5);
        assert_eq!(Amount::parse("  0.01 ").unwrap().value(), 0.01);
        assert_eq!(Amount::parse("1e3").unwrap().value(), 1000.0);
    }

    #[test]
    fn test_parse_rejects_non_numbers() {
        for text in ["", "   ", "abc", "12,50", "1.2.3", "NaN", "inf", "$5"] {
            assert!(
                matches!(Amount::parse(text), Err(AmountParseError::NotANumber(_))),
                "expected '{}' to be rejected as not a number",
                text
            );
        }
    }

    #[test]
    fn test_parse_rejects_non_positive() {
        assert_eq!(
            Amount::parse("0"),
            Err(AmountParseError::NotPositive(0.0))
        );
        assert_eq!(
            Amount::parse("-4.5"),
            Err(AmountParseError::NotPositive(-4.5))
        );
    }

    #[test]
    fn test_input_text_parses_back() {
        for value in [0.01, 1.0, 12.5, 99.99, 1234.5678] {
            let amount = Amount::new(value);
            assert_eq!(Amount::parse(&amount.to_input_text()).unwrap(), amount);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Amount::new(10.5).to_string(), "$10.50");
        assert_eq!(Amount::new(3.0).format_with_symbol("€"), "€3.00");
    }

    #[test]
    fn test_sum() {
        let total: Amount = [1.5, 2.25, 3.0].into_iter().map(Amount::new).sum();
        assert_eq!(total.value(), 6.75);
    }
}
