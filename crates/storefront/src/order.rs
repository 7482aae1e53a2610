//! Order submission.
//!
//! Submission is all-or-nothing from the buyer's point of view: the cart is
//! cleared only after the catalog service has confirmed the order. Any
//! failure before that point leaves the cart exactly as it was.

use std::sync::Arc;

use thiserror::Error;
use tracing::{error, info, instrument};

use kanap_core::{OrderId, ProductId};

use crate::cart::{CartLine, CartStore};
use crate::catalog::{CatalogClient, CatalogError};
use crate::checkout::ContactInfo;
use crate::storage::{KeyValueStore, StorageError, keys};

pub use crate::catalog::{OrderConfirmation, OrderRequest};

/// Errors that can occur when placing an order.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// Nothing to order; the service was not contacted.
    #[error("Cart is empty")]
    EmptyCart,

    /// The catalog service rejected or never received the order.
    #[error("Order submission failed: {0}")]
    Catalog(#[from] CatalogError),
}

/// Expand cart lines into the service's product list.
///
/// A line with quantity *n* contributes its product ID *n* times, in cart
/// order. Colours are not part of the service's order schema and are dropped.
#[must_use]
pub fn expand_products(lines: &[CartLine]) -> Vec<ProductId> {
    lines
        .iter()
        .flat_map(|line| {
            std::iter::repeat_n(line.product_id.clone(), line.quantity.get() as usize)
        })
        .collect()
}

/// Places orders and records their confirmation.
#[derive(Clone)]
pub struct OrderSubmitter {
    client: CatalogClient,
    storage: Arc<dyn KeyValueStore>,
}

impl OrderSubmitter {
    /// Create a submitter sending orders through `client` and recording
    /// confirmations in `storage`.
    #[must_use]
    pub fn new(client: CatalogClient, storage: Arc<dyn KeyValueStore>) -> Self {
        Self { client, storage }
    }

    /// Submit the cart as an order.
    ///
    /// On success the confirmation identifier is persisted under `orderId`
    /// and the cart is cleared. Local write failures after confirmation are
    /// logged but do not turn the result into an error: the order exists on
    /// the service side and must not be placed twice.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::EmptyCart`] without contacting the service
    /// when the cart is empty, or [`SubmissionError::Catalog`] when the
    /// service call fails. The cart is untouched in both cases.
    #[instrument(skip_all, fields(lines = cart.len()))]
    pub async fn submit(
        &self,
        cart: &mut CartStore,
        contact: &ContactInfo,
    ) -> Result<OrderConfirmation, SubmissionError> {
        if cart.is_empty() {
            return Err(SubmissionError::EmptyCart);
        }

        let order = OrderRequest {
            contact: contact.clone(),
            products: expand_products(cart.lines()),
        };

        let confirmation = self.client.place_order(&order).await?;
        info!(order_id = %confirmation.order_id, units = order.products.len(), "Order confirmed");

        if let Err(e) = self
            .storage
            .set(keys::ORDER_ID, confirmation.order_id.as_str())
        {
            error!(error = %e, order_id = %confirmation.order_id, "Failed to record order confirmation");
        }

        if let Err(e) = cart.clear() {
            error!(error = %e, order_id = %confirmation.order_id, "Failed to clear cart after confirmed order");
        }

        Ok(confirmation)
    }
}

/// Identifier of the last confirmed order, for the confirmation view.
///
/// # Errors
///
/// Returns an error if the storage backend cannot be read.
pub fn last_confirmation(storage: &dyn KeyValueStore) -> Result<Option<OrderId>, StorageError> {
    Ok(storage
        .get(keys::ORDER_ID)?
        .filter(|id| !id.trim().is_empty())
        .map(OrderId::new))
}
