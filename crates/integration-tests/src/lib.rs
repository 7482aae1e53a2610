//! Integration tests for the Kanap storefront.
//!
//! The catalog service is replaced by a `wiremock` server; persisted state
//! lives in memory or in a temporary directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kanap-integration-tests
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde_json::{Value, json};
use wiremock::MockServer;

use kanap_storefront::{
    CatalogConfig, ContactInfo, KeyValueStore, MemoryStore, Storefront, StorefrontConfig,
};

/// Configuration pointing at `mock_server`, persisting under `data_dir`.
#[must_use]
pub fn test_config(mock_server: &MockServer, data_dir: &Path) -> StorefrontConfig {
    config_for(&format!("{}/api", mock_server.uri()), data_dir)
}

/// Configuration pointing at `api_url`, persisting under `data_dir`.
///
/// # Panics
///
/// Panics if `api_url` is not a valid URL.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn config_for(api_url: &str, data_dir: &Path) -> StorefrontConfig {
    StorefrontConfig {
        catalog: CatalogConfig {
            api_url: url::Url::parse(api_url).unwrap(),
            timeout: Some(std::time::Duration::from_secs(5)),
        },
        data_dir: data_dir.to_path_buf(),
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// A session against `mock_server` with in-memory storage.
///
/// Returns the storage too so tests can inspect what was persisted.
#[must_use]
pub fn memory_session(mock_server: &MockServer) -> (Storefront, Arc<MemoryStore>) {
    session_at(&format!("{}/api", mock_server.uri()))
}

/// A session against `api_url` with in-memory storage.
///
/// # Panics
///
/// Panics if the session cannot be created.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn session_at(api_url: &str) -> (Storefront, Arc<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let config = config_for(api_url, Path::new("unused"));
    let session = Storefront::with_storage(config, storage.clone() as Arc<dyn KeyValueStore>).unwrap();
    (session, storage)
}

/// Base URL of a local port nothing listens on.
///
/// # Panics
///
/// Panics if no local port can be bound.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/api")
}

/// Product JSON as served by the catalog service.
#[must_use]
pub fn product_json(id: &str, name: &str, price: f64, colors: &[&str]) -> Value {
    json!({
        "_id": id,
        "name": name,
        "description": format!("{name} description"),
        "imageUrl": format!("http://localhost:3000/images/{id}.jpeg"),
        "altTxt": format!("Photo of {name}"),
        "price": price,
        "colors": colors,
    })
}

/// A complete, valid checkout form.
#[must_use]
pub fn valid_form() -> HashMap<String, String> {
    [
        ("firstName", "Ada"),
        ("lastName", "Lovelace"),
        ("address", "12 rue des Lilas"),
        ("city", "Paris"),
        ("email", "ada@example.com"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Contact details from [`valid_form`].
///
/// # Panics
///
/// Panics if the form does not validate.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn valid_contact() -> ContactInfo {
    kanap_storefront::checkout::validate(&valid_form()).unwrap()
}
