//! Catalog/order service client.
//!
//! # Endpoints
//!
//! - `GET  {api}/products` - full catalog listing
//! - `GET  {api}/products/{id}` - one product, non-2xx when unknown
//! - `POST {api}/products/order` - place an order, returns `{ "orderId": ... }`
//!
//! Responses are read as text first so that a malformed body can be logged
//! before it is reported as a parse error.

mod types;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{debug, instrument};

use kanap_core::{OrderId, ProductId};

use crate::config::CatalogConfig;

pub use types::{OrderConfirmation, OrderRequest, ProductDetail};
use types::OrderResponse;

/// Maximum number of body characters written to logs.
const LOG_BODY_LIMIT: usize = 500;

/// Maximum number of body characters kept in an error.
const ERROR_BODY_LIMIT: usize = 200;

/// Errors that can occur when talking to the catalog service.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed (connection refused, timeout, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Order accepted without an identifier.
    #[error("Order response has no orderId")]
    MissingOrderId,
}

/// Client for the catalog/order service.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url: config.api_url.as_str().trim_end_matches('/').to_string(),
            }),
        })
    }

    /// Base URL every endpoint is resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// List every product in the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body is malformed.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Vec<ProductDetail>, CatalogError> {
        let url = format!("{}/products", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;
        let products: Vec<ProductDetail> = read_json(response, "products").await?;
        debug!(count = products.len(), "Fetched catalog");
        Ok(products)
    }

    /// Fetch one product by ID.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for a 404, or another error if the
    /// request fails or the body is malformed.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn product(&self, id: &ProductId) -> Result<ProductDetail, CatalogError> {
        let url = format!(
            "{}/products/{}",
            self.inner.base_url,
            urlencoding::encode(id.as_str())
        );
        let response = self.inner.client.get(&url).send().await?;
        read_json(response, id.as_str()).await
    }

    /// Submit an order.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure, non-success status, malformed
    /// body, or a response without an order identifier.
    #[instrument(skip(self, order), fields(units = order.products.len()))]
    pub async fn place_order(
        &self,
        order: &OrderRequest,
    ) -> Result<OrderConfirmation, CatalogError> {
        let url = format!("{}/products/order", self.inner.base_url);
        let response = self.inner.client.post(&url).json(order).send().await?;
        let body: OrderResponse = read_json(response, "order").await?;

        let order_id = body
            .order_id
            .filter(|id| !id.trim().is_empty())
            .ok_or(CatalogError::MissingOrderId)?;

        Ok(OrderConfirmation {
            order_id: OrderId::new(order_id),
        })
    }
}

/// Check the status and decode a JSON body.
async fn read_json<T: DeserializeOwned>(
    response: reqwest::Response,
    resource: &str,
) -> Result<T, CatalogError> {
    let status = response.status();

    // Get response body as text first for better error diagnostics
    let text = response.text().await?;

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(CatalogError::NotFound(resource.to_string()));
    }

    if !status.is_success() {
        tracing::error!(
            status = %status,
            body = %truncate(&text, LOG_BODY_LIMIT),
            "Catalog service returned non-success status"
        );
        return Err(CatalogError::Status {
            status: status.as_u16(),
            body: truncate(&text, ERROR_BODY_LIMIT),
        });
    }

    serde_json::from_str(&text).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %truncate(&text, LOG_BODY_LIMIT),
            "Failed to parse catalog response"
        );
        CatalogError::Parse(e)
    })
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::NotFound("abc".to_string());
        assert_eq!(err.to_string(), "Not found: abc");

        let err = CatalogError::Status {
            status: 503,
            body: "down".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 503: down");
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("éèàç", 2), "éè");
        assert_eq!(truncate("ok", 10), "ok");
    }

    #[test]
    fn test_base_url_drops_trailing_slash() {
        let config = CatalogConfig {
            api_url: "http://localhost:3000/api/".parse().unwrap(),
            timeout: None,
        };
        let client = CatalogClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000/api");
    }
}
