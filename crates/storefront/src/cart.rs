//! Cart Store: the canonical list of cart lines.
//!
//! Lines are identified by `(product, colour)`. Adding an existing selection
//! merges quantities instead of appending a duplicate, and a line whose
//! quantity drops to zero is removed. Every mutation is written to the
//! [`KeyValueStore`] before the call returns; if the write fails the
//! in-memory cart is left as it was.

use core::fmt;
use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use kanap_core::{Color, ProductId, Quantity};

use crate::storage::{KeyValueStore, StorageError, keys};

/// Errors that can occur when mutating the cart.
#[derive(Debug, Error)]
pub enum CartError {
    /// Quantity to add must be positive.
    #[error("Quantity must be at least {min} (got {0})", min = Quantity::MIN)]
    InvalidQuantity(i64),

    /// No line with this product and colour.
    #[error("Cart line not found: {0}")]
    LineNotFound(LineKey),

    /// Persisting the cart failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Serializing the cart failed.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Identity of a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub product_id: ProductId,
    pub color: Color,
}

impl LineKey {
    /// Build a key from its parts.
    #[must_use]
    pub fn new(product_id: impl Into<ProductId>, color: impl Into<Color>) -> Self {
        Self {
            product_id: product_id.into(),
            color: color.into(),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.product_id, self.color)
    }
}

/// One product/colour selection.
///
/// Serialized as `{"id", "color", "quantity"}`, the storefront's historical
/// storage format; `productId` is accepted when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id", alias = "productId")]
    pub product_id: ProductId,
    pub color: Color,
    pub quantity: Quantity,
}

impl CartLine {
    /// Identity of this line.
    #[must_use]
    pub fn key(&self) -> LineKey {
        LineKey {
            product_id: self.product_id.clone(),
            color: self.color.clone(),
        }
    }

    fn matches(&self, key: &LineKey) -> bool {
        self.product_id == key.product_id && self.color == key.color
    }
}

/// Persisted line before validation; quantity may be out of range.
#[derive(Debug, Deserialize)]
struct StoredLine {
    #[serde(rename = "id", alias = "productId")]
    product_id: ProductId,
    color: Color,
    quantity: i64,
}

/// The shopping cart for one session.
pub struct CartStore {
    storage: Arc<dyn KeyValueStore>,
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Load the persisted cart.
    ///
    /// Missing, unreadable or unparsable state yields an empty cart. Stored
    /// lines are repaired on the way in: zero quantities are dropped, large
    /// ones capped and duplicate selections merged.
    #[must_use]
    pub fn load(storage: Arc<dyn KeyValueStore>) -> Self {
        let lines = match storage.get(keys::CART) {
            Ok(Some(raw)) => decode_lines(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read persisted cart, starting empty");
                Vec::new()
            }
        };
        debug!(lines = lines.len(), "Cart loaded");
        Self { storage, lines }
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity.get()).sum()
    }

    /// Look up a line by key.
    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.matches(key))
    }

    /// Add `quantity` units of a selection.
    ///
    /// An existing line with the same product and colour grows by `quantity`;
    /// otherwise a new line is appended. Quantities saturate at
    /// [`Quantity::MAX`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a non-positive quantity, or
    /// a storage error if the cart cannot be persisted.
    pub fn add_or_merge(
        &mut self,
        product_id: ProductId,
        color: Color,
        quantity: i64,
    ) -> Result<(), CartError> {
        let added = Quantity::clamp(quantity).ok_or(CartError::InvalidQuantity(quantity))?;

        let mut next = self.lines.clone();
        if let Some(line) = next
            .iter_mut()
            .find(|l| l.product_id == product_id && l.color == color)
        {
            line.quantity = line.quantity.saturating_add(added);
            debug!(product_id = %product_id, color = %color, quantity = %line.quantity, "Merged into existing cart line");
        } else {
            debug!(product_id = %product_id, color = %color, quantity = %added, "Appended cart line");
            next.push(CartLine {
                product_id,
                color,
                quantity: added,
            });
        }

        self.commit(next)
    }

    /// Overwrite the quantity of one line.
    ///
    /// Values at or below zero remove the line; values above
    /// [`Quantity::MAX`] are capped.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the line does not exist, or a
    /// storage error if the cart cannot be persisted.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i64) -> Result<(), CartError> {
        let position = self.position(key)?;
        let mut next = self.lines.clone();

        match Quantity::clamp(quantity) {
            Some(q) => {
                if let Some(line) = next.get_mut(position) {
                    line.quantity = q;
                }
            }
            None => {
                next.remove(position);
            }
        }

        self.commit(next)
    }

    /// Delete exactly one line.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::LineNotFound`] if the line does not exist, or a
    /// storage error if the cart cannot be persisted.
    pub fn remove(&mut self, key: &LineKey) -> Result<CartLine, CartError> {
        let position = self.position(key)?;
        let mut next = self.lines.clone();
        let removed = next.remove(position);
        self.commit(next)?;
        Ok(removed)
    }

    /// Empty the cart and persist the empty state.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the cart cannot be persisted.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.commit(Vec::new())
    }

    fn position(&self, key: &LineKey) -> Result<usize, CartError> {
        self.lines
            .iter()
            .position(|l| l.matches(key))
            .ok_or_else(|| CartError::LineNotFound(key.clone()))
    }

    /// Persist `next`, then adopt it as the current cart.
    fn commit(&mut self, next: Vec<CartLine>) -> Result<(), CartError> {
        let encoded = serde_json::to_string(&next)?;
        self.storage.set(keys::CART, &encoded)?;
        self.lines = next;
        Ok(())
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}

/// Decode persisted lines, repairing anything that breaks cart invariants.
fn decode_lines(raw: &str) -> Vec<CartLine> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(raw) {
        Ok(entries) => entries,
        Err(e) => {
            warn!(error = %e, "Persisted cart is malformed, starting empty");
            return Vec::new();
        }
    };

    let mut lines: Vec<CartLine> = Vec::with_capacity(entries.len());
    let mut index: HashMap<LineKey, usize> = HashMap::new();

    for entry in entries {
        let stored: StoredLine = match serde_json::from_value(entry) {
            Ok(stored) => stored,
            Err(e) => {
                warn!(error = %e, "Dropping malformed cart line");
                continue;
            }
        };

        let Some(quantity) = Quantity::clamp(stored.quantity) else {
            warn!(product_id = %stored.product_id, quantity = stored.quantity, "Dropping cart line with non-positive quantity");
            continue;
        };

        let key = LineKey {
            product_id: stored.product_id,
            color: stored.color,
        };

        if let Some(line) = index.get(&key).and_then(|&i| lines.get_mut(i)) {
            warn!(line = %key, "Merging duplicate cart line");
            line.quantity = line.quantity.saturating_add(quantity);
            continue;
        }

        index.insert(key.clone(), lines.len());
        lines.push(CartLine {
            product_id: key.product_id,
            color: key.color,
            quantity,
        });
    }

    lines
}
