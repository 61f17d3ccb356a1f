//! Domain types for the product catalog.
//!
//! These types are the clean, ergonomic surface the engines and pages work
//! with; how the catalog data is populated (static bundle vs. remote API)
//! is the host's concern.

use aurelia_core::{Category, Handle, Price, ProductId};
use serde::{Deserialize, Serialize};

/// A purchasable catalog product.
///
/// Products are immutable once the catalog is constructed; engines hold
/// clones or ids, never mutate them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque unique identifier.
    pub id: ProductId,
    /// URL-safe slug, unique, used as the external lookup key.
    pub handle: Handle,
    /// Display title.
    pub title: String,
    /// Display description.
    pub description: String,
    /// Current selling price.
    pub price: Price,
    /// Original price before discount, when on sale. Always >= `price`.
    pub compare_at_price: Option<Price>,
    /// Category tag.
    pub category: Category,
    /// Free-text material classification (e.g., "18k gold vermeil").
    pub material: String,
    /// Named collections this product belongs to.
    pub collections: Vec<String>,
    /// New-arrival flag.
    pub is_new: bool,
    /// Bestseller flag.
    pub is_bestseller: bool,
    /// Care instructions.
    pub care: String,
}

impl Product {
    /// Whether the product is currently discounted.
    #[must_use]
    pub fn on_sale(&self) -> bool {
        self.compare_at_price
            .is_some_and(|compare_at| compare_at > self.price)
    }

    /// Whether the product belongs to the named collection.
    #[must_use]
    pub fn in_collection(&self, collection: &str) -> bool {
        self.collections.iter().any(|c| c == collection)
    }
}
