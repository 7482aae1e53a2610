//! Kanap Core - Shared types library.
//!
//! This crate provides common types used across all Kanap components:
//! - `storefront` - Cart, catalog client and checkout pipeline
//! - `cli` - Terminal front-end for browsing and ordering
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no persistence,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs, colors, prices, quantities and emails

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
