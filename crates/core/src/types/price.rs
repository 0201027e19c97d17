//! Type-safe price representation using decimal arithmetic.
//!
//! Prices are non-negative decimal amounts in the store's display currency.
//! All arithmetic stays in [`Decimal`] so line totals and order totals never
//! pick up float rounding noise.

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error constructing a [`Price`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceError {
    /// Prices are non-negative; rejected amount included for context.
    #[error("price cannot be negative: {0}")]
    Negative(Decimal),
}

/// A non-negative price in the store's display currency.
///
/// Serializes as a bare decimal string (via `rust_decimal`'s serde support);
/// deserialization re-checks the non-negative invariant.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Price(Decimal);

impl Price {
    /// The zero price.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a price, rejecting negative amounts.
    ///
    /// # Errors
    ///
    /// Returns an error if `amount` is negative.
    pub fn new(amount: Decimal) -> Result<Self, PriceError> {
        if amount < Decimal::ZERO {
            return Err(PriceError::Negative(amount));
        }
        Ok(Self(amount))
    }

    /// Create a price from a whole number of cents.
    #[must_use]
    pub fn from_cents(cents: u32) -> Self {
        Self(Decimal::new(i64::from(cents), 2))
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Total for `quantity` units at this unit price.
    #[must_use]
    pub fn line_total(&self, quantity: u32) -> Self {
        Self(self.0 * Decimal::from(quantity))
    }
}

impl fmt::Display for Price {
    /// Formats with a dollar sign and exactly two decimal places, e.g. `$6.00`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PriceError;

    fn try_from(amount: Decimal) -> Result<Self, Self::Error> {
        Self::new(amount)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_negative_amounts() {
        assert!(Price::new(Decimal::ZERO).is_ok());
        assert!(Price::new(Decimal::new(1999, 2)).is_ok());

        let negative = Decimal::new(-1, 2);
        assert_eq!(Price::new(negative), Err(PriceError::Negative(negative)));
    }

    #[test]
    fn test_display_always_shows_two_decimals() {
        assert_eq!(Price::from_cents(600).to_string(), "$6.00");
        assert_eq!(Price::from_cents(1999).to_string(), "$19.99");
        assert_eq!(Price::ZERO.to_string(), "$0.00");

        // A whole-number decimal still renders with cents.
        let three = Price::new(Decimal::from(3)).expect("non-negative");
        assert_eq!(three.to_string(), "$3.00");
    }

    #[test]
    fn test_line_total_multiplies_by_quantity() {
        let unit = Price::from_cents(300);
        assert_eq!(unit.line_total(2), Price::from_cents(600));
        assert_eq!(unit.line_total(0), Price::ZERO);
    }

    #[test]
    fn test_sum_over_lines() {
        let total: Price = [Price::from_cents(600), Price::from_cents(150)]
            .into_iter()
            .sum();
        assert_eq!(total, Price::from_cents(750));
    }

    #[test]
    fn test_deserialize_rechecks_invariant() {
        let ok: Price = serde_json::from_str("\"6.00\"").expect("non-negative parses");
        assert_eq!(ok, Price::from_cents(600));

        assert!(serde_json::from_str::<Price>("\"-1.00\"").is_err());
    }
}
