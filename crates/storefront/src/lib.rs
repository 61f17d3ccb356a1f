//! Aurelia Storefront - state and query engines.
//!
//! This crate is the client-side core of the Aurelia jewelry and eyewear
//! storefront: the immutable product catalog, the cart and wishlist engines,
//! the filter/sort query engine the collection pages share, and the durable
//! persistence layer that mirrors engine state across sessions.
//!
//! The UI host constructs the engines at startup and injects them into page
//! components; nothing in here renders or routes.
//!
//! # Modules
//!
//! - [`catalog`] - Immutable product list with handle/id/collection lookups
//! - [`cart`] - Quantity-keyed line items with derived totals
//! - [`wishlist`] - Deduplicated product set with remote account sync
//! - [`query`] - Composable filter predicates and sort strategies
//! - [`persist`] - Durable key-value mirror of engine state
//! - [`sync`] - Remote wishlist endpoint client
//! - [`stream`] - Chat response delta parser (SSE line protocol)

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod persist;
pub mod query;
pub mod stream;
pub mod sync;
pub mod telemetry;
pub mod wishlist;

pub use error::{Result, StorefrontError};
