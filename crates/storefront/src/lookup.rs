//! Per-session product detail cache.
//!
//! Each product is fetched from the catalog at most once per session. The
//! cache has no TTL and no size bound: entries live as long as the
//! [`ProductLookup`] itself, which is created at session start. Failed fetches are never cached, so a
//! later lookup for the same ID retries the network.

use std::sync::Arc;

use moka::future::Cache;
use tracing::{debug, instrument, warn};

use kanap_core::ProductId;

use crate::catalog::{CatalogClient, CatalogError, ProductDetail};

/// Memoizing front for [`CatalogClient::product`].
///
/// Concurrent lookups for the same ID share a single in-flight request.
#[derive(Clone)]
pub struct ProductLookup {
    client: CatalogClient,
    cache: Cache<ProductId, ProductDetail>,
}

impl ProductLookup {
    /// Create an empty lookup cache in front of `client`.
    #[must_use]
    pub fn new(client: CatalogClient) -> Self {
        let cache = Cache::builder().build();
        Self { client, cache }
    }

    /// Resolve a product, hitting the network only on the first successful call.
    ///
    /// Returns `None` when the product cannot be fetched; the failure is
    /// logged and not remembered.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn get(&self, id: &ProductId) -> Option<ProductDetail> {
        match self.try_get(id).await {
            Ok(product) => Some(product),
            Err(e) => {
                warn!(error = %e, "Product lookup failed");
                None
            }
        }
    }

    /// Like [`ProductLookup::get`] but keeps the failure.
    ///
    /// # Errors
    ///
    /// Returns the catalog error shared by every caller that joined the
    /// failed fetch.
    pub async fn try_get(&self, id: &ProductId) -> Result<ProductDetail, Arc<CatalogError>> {
        if let Some(product) = self.cache.get(id).await {
            debug!("Cache hit for product");
            return Ok(product);
        }

        debug!("Cache miss for product");
        let client = self.client.clone();
        let key = id.clone();
        self.cache
            .try_get_with(id.clone(), async move { client.product(&key).await })
            .await
    }

    /// Whether `id` is currently memoized.
    pub async fn contains(&self, id: &ProductId) -> bool {
        self.cache.get(id).await.is_some()
    }
}
