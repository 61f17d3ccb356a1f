//! Aurelia Core - Shared types library.
//!
//! This crate provides common types used across all Aurelia components:
//! - `storefront` - State and query engines embedded by the storefront UI
//! - `integration-tests` - Cross-engine scenario tests
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no network
//! clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, handles, prices, and
//!   product categories

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
