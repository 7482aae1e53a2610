//! Type-safe price representation using decimal arithmetic.
//!
//! The catalog quotes prices as plain JSON numbers in the store currency.
//! They are held as [`Decimal`] so that line subtotals and cart totals are
//! exact (`5.50 * 3` is `16.50`, never `16.499999`).

use core::fmt;
use core::iter::Sum;
use core::ops::Add;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quantity::Quantity;

/// Errors that can occur when constructing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// Catalog prices are never negative.
    #[error("price cannot be negative (got {0})")]
    Negative(Decimal),

    /// Above [`Price::MAX`].
    #[error("price exceeds {max} (got {value})")]
    TooLarge { value: Decimal, max: Decimal },
}

/// A non-negative amount in the store currency, at most [`Price::MAX`].
///
/// `Display` always renders exactly two decimal places. Arithmetic
/// saturates instead of overflowing.
///
/// ```
/// use kanap_core::{Price, Quantity};
/// use rust_decimal::Decimal;
///
/// let price = Price::parse(Decimal::new(550, 2)).unwrap();
/// assert_eq!(price.times(Quantity::new(3).unwrap()).to_string(), "16.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Price(Decimal);

impl Price {
    /// The zero amount.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Largest unit price accepted from the catalog.
    pub const MAX: Self = Self(Decimal::from_parts(1_000_000_000, 0, 0, false, 0));

    /// Parse a price, rejecting negative and oversized amounts.
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::Negative`] if `amount` is below zero, or
    /// [`PriceError::TooLarge`] if it is above [`Price::MAX`].
    pub fn parse(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(PriceError::Negative(amount));
        }
        if amount > Self::MAX.0 {
            return Err(PriceError::TooLarge {
                value: amount,
                max: Self::MAX.0,
            });
        }
        Ok(Self(amount))
    }

    /// Returns the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Subtotal for `quantity` units at this price.
    #[must_use]
    pub fn times(self, quantity: Quantity) -> Self {
        Self(self.0.saturating_mul(Decimal::from(quantity.get())))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0.round_dp(2))
    }
}

impl Add for Price {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let amount = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::parse(amount).map_err(serde::de::Error::custom)
    }
}
