//! Session state shared by every storefront operation.

use std::sync::Arc;

use kanap_core::OrderId;

use crate::cart::CartStore;
use crate::catalog::CatalogClient;
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::lookup::ProductLookup;
use crate::order::{OrderSubmitter, last_confirmation};
use crate::presenter::CartPresenter;
use crate::storage::{FileStore, KeyValueStore};

/// One shopping session.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// catalog client, the session's product lookup cache and durable storage.
/// The lookup cache lives exactly as long as the session.
#[derive(Clone)]
pub struct Storefront {
    inner: Arc<StorefrontInner>,
}

struct StorefrontInner {
    config: StorefrontConfig,
    catalog: CatalogClient,
    lookup: ProductLookup,
    storage: Arc<dyn KeyValueStore>,
}

impl Storefront {
    /// Start a session persisting to `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the data
    /// directory cannot be created.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage = Arc::new(FileStore::open(&config.data_dir)?);
        Self::with_storage(config, storage)
    }

    /// Start a session backed by the given storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_storage(config: StorefrontConfig, storage: Arc<dyn KeyValueStore>) -> Result<Self> {
        let catalog = CatalogClient::new(&config.catalog)?;
        let lookup = ProductLookup::new(catalog.clone());

        Ok(Self {
            inner: Arc::new(StorefrontInner {
                config,
                catalog,
                lookup,
                storage,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog service client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the session's product lookup.
    #[must_use]
    pub fn lookup(&self) -> &ProductLookup {
        &self.inner.lookup
    }

    /// Get the durable storage.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.inner.storage)
    }

    /// Load the persisted cart.
    #[must_use]
    pub fn load_cart(&self) -> CartStore {
        CartStore::load(self.storage())
    }

    /// Presenter sharing this session's lookup cache.
    #[must_use]
    pub fn presenter(&self) -> CartPresenter {
        CartPresenter::new(self.inner.lookup.clone())
    }

    /// Submitter recording confirmations in this session's storage.
    #[must_use]
    pub fn submitter(&self) -> OrderSubmitter {
        OrderSubmitter::new(self.inner.catalog.clone(), self.storage())
    }

    /// Identifier of the most recently confirmed order, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if storage cannot be read.
    pub fn last_order_id(&self) -> Result<Option<OrderId>> {
        Ok(last_confirmation(self.inner.storage.as_ref())?)
    }
}
