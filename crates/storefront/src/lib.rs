//! Kanap Storefront library.
//!
//! Keeps a locally persisted shopping cart in sync with the remote catalog
//! service and turns it into an order.
//!
//! # Architecture
//!
//! - [`catalog`] - HTTP client for the catalog/order service
//! - [`lookup`] - Per-session memoized product detail lookups
//! - [`storage`] - Durable key-value persistence contract
//! - [`cart`] - Cart Store: canonical list of cart lines
//! - [`presenter`] - Derived cart view with subtotals and totals
//! - [`checkout`] - Contact form validation
//! - [`order`] - All-or-nothing order submission
//! - [`notice`] - Transient user-facing alerts
//!
//! [`state::Storefront`] wires these together for a single session.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod lookup;
pub mod notice;
pub mod order;
pub mod presenter;
pub mod state;
pub mod storage;

pub use cart::{CartError, CartLine, CartStore, LineKey};
pub use catalog::{CatalogClient, CatalogError, ProductDetail};
pub use checkout::{ContactField, ContactInfo, FieldViolation, ValidationErrors, ViolationKind};
pub use config::{CatalogConfig, ConfigError, StorefrontConfig};
pub use error::AppError;
pub use lookup::ProductLookup;
pub use notice::{Notice, NoticeLevel};
pub use order::{OrderConfirmation, OrderRequest, OrderSubmitter, SubmissionError};
pub use presenter::{CartItemView, CartPresenter, CartView};
pub use state::Storefront;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
