//! Unified error handling for the storefront core.
//!
//! Per-module errors ([`CatalogError`], [`StoreError`], [`SyncError`],
//! [`StreamError`], [`ConfigError`]) convert into a single
//! [`StorefrontError`] at the crate boundary. Expected absences - a missed
//! handle lookup, an empty filter result, removing a product that is not in
//! the cart - are never errors; they surface as `Option` or empty
//! collections.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::persist::StoreError;
use crate::stream::StreamError;
use crate::sync::SyncError;

/// Top-level error type for the storefront core.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Catalog construction failed (duplicate id or handle).
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Durable store operation failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] StoreError),

    /// Remote wishlist sync failed.
    #[error("Sync error: {0}")]
    Sync(#[from] SyncError),

    /// Chat stream payload could not be parsed.
    #[error("Stream error: {0}")]
    Stream(#[from] StreamError),

    /// Configuration loading failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// An engine lock was poisoned by a panicking thread.
    #[error("Engine lock poisoned")]
    LockPoisoned,
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
