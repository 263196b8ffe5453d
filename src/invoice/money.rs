//! Validated numeric value types for invoice rows.
//!
//! Form fields arrive as raw text. They are parsed once, here, into
//! `Money`, `Quantity` and `DiscountPercent`; the calculator only ever sees
//! these types.

use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// Largest count accepted for a single row.
pub const MAX_QUANTITY: u32 = 1_000_000;

lazy_static! {
    // Up to 15 integer digits and 10 fractional digits; "2." and ".5" are accepted.
    static ref AMOUNT_PATTERN: Regex =
        Regex::new(r"^(?:\d{1,15}(?:\.\d{0,10})?|\.\d{1,10})$").expect("valid amount pattern");
    static ref COUNT_PATTERN: Regex = Regex::new(r"^\d{1,7}$").expect("valid count pattern");
}

/// Errors raised while parsing a numeric form field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("value is empty")]
    Empty,
    #[error("'{0}' is not a valid non-negative amount")]
    InvalidAmount(String),
    #[error("'{0}' is not a whole number")]
    InvalidCount(String),
    #[error("count {0} must be between 1 and {max}", max = MAX_QUANTITY)]
    CountOutOfRange(u64),
    #[error("discount {0}% must be between 0 and 100")]
    DiscountOutOfRange(Decimal),
}

/// A non-negative decimal amount, kept at the scale it was entered with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Parse a price field. Surrounding whitespace is ignored; signs,
    /// exponents and separators are rejected.
    pub fn parse(input: &str) -> Result<Self, AmountError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }
        if !AMOUNT_PATTERN.is_match(trimmed) {
            return Err(AmountError::InvalidAmount(trimmed.to_string()));
        }

        let normalized = match (trimmed.starts_with('.'), trimmed.ends_with('.')) {
            (true, _) => format!("0{trimmed}"),
            (false, true) => trimmed.trim_end_matches('.').to_string(),
            (false, false) => trimmed.to_string(),
        };

        Decimal::from_str(&normalized)
            .map(Money)
            .map_err(|_| AmountError::InvalidAmount(trimmed.to_string()))
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A positive item count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    /// Parse a count field. An empty field means one.
    pub fn parse_or_default(input: &str) -> Result<Self, AmountError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::ONE);
        }
        if !COUNT_PATTERN.is_match(trimmed) {
            return Err(AmountError::InvalidCount(trimmed.to_string()));
        }
        let value: u64 = trimmed
            .parse()
            .map_err(|_| AmountError::InvalidCount(trimmed.to_string()))?;
        if value == 0 || value > u64::from(MAX_QUANTITY) {
            return Err(AmountError::CountOutOfRange(value));
        }
        Ok(Quantity(value as u32))
    }

    pub fn get(&self) -> u32 {
        self.0
    }

    pub fn as_decimal(&self) -> Decimal {
        Decimal::from(self.0)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Discount percentage, guaranteed to lie in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, ToSchema)]
#[serde(transparent)]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    pub const NONE: DiscountPercent = DiscountPercent(Decimal::ZERO);

    /// Range-checked constructor. Values outside `0..=100` are rejected, not clamped.
    pub fn new(value: Decimal) -> Result<Self, AmountError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(AmountError::DiscountOutOfRange(value));
        }
        Ok(DiscountPercent(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_money_keeps_entered_scale() {
        let price = Money::parse("2.50").unwrap();
        assert_eq!(price.to_string(), "2.50");
        assert_eq!(price.amount(), Decimal::new(25, 1));
    }

    #[test]
    fn test_money_accepts_dot_forms_and_whitespace() {
        assert_eq!(Money::parse("2.").unwrap().amount(), Decimal::from(2));
        assert_eq!(Money::parse(".5").unwrap().amount(), Decimal::new(5, 1));
        assert_eq!(Money::parse("  10 ").unwrap().amount(), Decimal::from(10));
    }

    #[test]
    fn test_money_accepts_long_prices() {
        assert_eq!(Money::parse("1.23456").unwrap().amount(), Decimal::new(123456, 5));
        assert_eq!(
            Money::parse("1234567890123").unwrap().amount(),
            Decimal::from(1_234_567_890_123_i64)
        );
        assert!(Money::parse("123456789012345.1234567890").is_ok());
    }

    #[test]
    fn test_money_rejects_invalid_text() {
        for input in [
            "bad",
            "-1",
            "+3",
            "1e3",
            "1,000",
            "1.2.3",
            ".",
            "1234567890123456",
            "1.12345678901",
            ".12345678901",
        ] {
            assert!(Money::parse(input).is_err(), "{input} should be rejected");
        }
        assert_eq!(Money::parse("   "), Err(AmountError::Empty));
    }

    #[test]
    fn test_quantity_defaults_to_one() {
        assert_eq!(Quantity::parse_or_default("").unwrap(), Quantity::ONE);
        assert_eq!(Quantity::parse_or_default(" 4 ").unwrap().get(), 4);
    }

    #[test]
    fn test_quantity_rejects_zero_and_junk() {
        assert_eq!(
            Quantity::parse_or_default("0"),
            Err(AmountError::CountOutOfRange(0))
        );
        assert!(Quantity::parse_or_default("2.5").is_err());
        assert!(Quantity::parse_or_default("-1").is_err());
        assert!(Quantity::parse_or_default("9999999").is_err());
    }

    #[test]
    fn test_discount_range() {
        assert!(DiscountPercent::new(Decimal::ZERO).is_ok());
        assert!(DiscountPercent::new(Decimal::ONE_HUNDRED).is_ok());
        assert!(DiscountPercent::new(Decimal::new(1001, 1)).is_err());
        assert!(DiscountPercent::new(Decimal::new(-1, 2)).is_err());
    }
}
