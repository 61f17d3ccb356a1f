//! Core types for Aurelia.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod category;
pub mod handle;
pub mod id;
pub mod price;

pub use category::{Category, CategoryError};
pub use handle::{Handle, HandleError};
pub use id::*;
pub use price::{CurrencyCode, Price};
