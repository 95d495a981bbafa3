//! Type-safe price representation using decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input string is empty.
    #[error("price cannot be empty")]
    Empty,
    /// The input is not a decimal number.
    #[error("invalid price: {0:?}")]
    Invalid(String),
    /// The amount is negative.
    #[error("price cannot be negative")]
    Negative,
}

/// A non-negative USD price.
///
/// Parsed from user input with a leading `$` and thousands separators
/// tolerated, rounded to cents. Stored in the database as its canonical
/// decimal string form.
///
/// ```
/// use fretwork_core::Price;
///
/// let price = Price::parse("$1,299.99").unwrap();
/// assert_eq!(price.to_string(), "1299.99");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// Parse a `Price` from user input.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, is not a decimal number, or
    /// is negative.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let cleaned = s.trim().trim_start_matches('$').replace(',', "");
        if cleaned.is_empty() {
            return Err(PriceError::Empty);
        }

        let amount =
            Decimal::from_str(&cleaned).map_err(|_| PriceError::Invalid(s.to_owned()))?;
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }

        Ok(Self(amount.round_dp(2)))
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain() {
        let price = Price::parse("1299.99").unwrap();
        assert_eq!(price.to_string(), "1299.99");
    }

    #[test]
    fn test_parse_with_dollar_sign_and_commas() {
        let price = Price::parse(" $1,299.99 ").unwrap();
        assert_eq!(price.to_string(), "1299.99");
    }

    #[test]
    fn test_parse_rounds_to_cents() {
        let price = Price::parse("10.999").unwrap();
        assert_eq!(price.to_string(), "11.00");
    }

    #[test]
    fn test_parse_zero_is_allowed() {
        assert!(Price::parse("0").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Price::parse(""), Err(PriceError::Empty)));
        assert!(matches!(Price::parse("$"), Err(PriceError::Empty)));
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse("-5"), Err(PriceError::Negative)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            Price::parse("cheap"),
            Err(PriceError::Invalid(_))
        ));
    }
}
