//! Catalog service payloads.

use serde::{Deserialize, Serialize};

use kanap_core::{Color, OrderId, Price, ProductId};

use crate::checkout::ContactInfo;

/// A product as described by the catalog service.
///
/// The service names its identifier `_id`; `id` is accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    /// Catalog identifier.
    #[serde(alias = "_id")]
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Marketing description.
    #[serde(default)]
    pub description: String,
    /// Product image URL.
    pub image_url: String,
    /// Alternative text for the image.
    #[serde(rename = "altTxt", default)]
    pub alt_text: String,
    /// Unit price.
    pub price: Price,
    /// Colour options.
    #[serde(default)]
    pub colors: Vec<Color>,
}

impl ProductDetail {
    /// Whether `color` is one of this product's colour options.
    #[must_use]
    pub fn offers_color(&self, color: &Color) -> bool {
        self.colors.contains(color)
    }
}

/// Body of `POST /products/order`.
///
/// The service's order schema has no quantity or colour field: a line with
/// quantity *n* is sent as *n* copies of its product ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    /// Buyer contact details.
    pub contact: ContactInfo,
    /// Product IDs, repeated once per unit.
    pub products: Vec<ProductId>,
}

/// Successful order placement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    /// Identifier issued by the catalog service.
    pub order_id: OrderId,
}

/// Raw order response; only the identifier is used.
#[derive(Debug, Deserialize)]
pub(super) struct OrderResponse {
    #[serde(rename = "orderId", default)]
    pub order_id: Option<String>,
}
