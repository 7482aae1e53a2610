//! Cart line quantity.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`Quantity`].
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityError {
    /// The value is outside `MIN..=MAX`.
    #[error("quantity must be between {min} and {max} (got {value})")]
    OutOfRange {
        /// Rejected value.
        value: i64,
        /// Smallest accepted quantity.
        min: u32,
        /// Largest accepted quantity.
        max: u32,
    },
}

/// Number of units of one product/colour selection.
///
/// ## Constraints
///
/// - Range: `1..=100` inclusive
/// - A selection driven to zero or below is removed, never stored as zero
///
/// ```
/// use kanap_core::Quantity;
///
/// assert!(Quantity::new(0).is_err());
/// assert_eq!(Quantity::clamp(250).map(Quantity::get), Some(100));
/// assert_eq!(Quantity::clamp(-1), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest quantity a cart line may hold.
    pub const MIN: u32 = 1;
    /// Largest quantity a cart line may hold.
    pub const MAX: u32 = 100;

    /// Create a quantity, rejecting values outside `MIN..=MAX`.
    ///
    /// # Errors
    ///
    /// Returns [`QuantityError::OutOfRange`] for values outside the range.
    pub fn new(value: i64) -> Result<Self, QuantityError> {
        u32::try_from(value)
            .ok()
            .filter(|v| (Self::MIN..=Self::MAX).contains(v))
            .map(Self)
            .ok_or(QuantityError::OutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            })
    }

    /// Bring an arbitrary value into range.
    ///
    /// Returns `None` for values at or below zero (the line should go away),
    /// otherwise saturates at [`Quantity::MAX`].
    #[must_use]
    pub fn clamp(value: i64) -> Option<Self> {
        if value < i64::from(Self::MIN) {
            return None;
        }
        let capped = value.min(i64::from(Self::MAX));
        u32::try_from(capped).ok().map(Self)
    }

    /// Add two quantities, saturating at [`Quantity::MAX`].
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0).min(Self::MAX))
    }

    /// Returns the quantity as a plain integer.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl TryFrom<i64> for Quantity {
    type Error = QuantityError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
