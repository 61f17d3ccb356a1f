//! Immutable product catalog with handle, id, and collection lookups.
//!
//! The catalog is loaded once at startup and never mutated for the process
//! lifetime. Lookups that miss return `None` or an empty list - callers
//! render "not found" / empty states, they do not handle errors.

mod seed;
mod types;

use std::collections::HashMap;

use aurelia_core::{Handle, ProductId};
use thiserror::Error;

pub use seed::seed_catalog;
pub use types::Product;

/// Errors that can occur when constructing a [`Catalog`].
///
/// Duplicate keys are a data-authoring bug, so they fail construction
/// rather than being tolerated at lookup time.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two products share the same id.
    #[error("duplicate product id: {0}")]
    DuplicateId(ProductId),
    /// Two products share the same handle.
    #[error("duplicate product handle: {0}")]
    DuplicateHandle(Handle),
}

/// The static, immutable set of purchasable products.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<ProductId, usize>,
    by_handle: HashMap<Handle, usize>,
}

impl Catalog {
    /// Build a catalog from a product list, preserving insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if two products share an id or a handle.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut by_id = HashMap::with_capacity(products.len());
        let mut by_handle = HashMap::with_capacity(products.len());

        for (index, product) in products.iter().enumerate() {
            if by_id.insert(product.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(product.id.clone()));
            }
            if by_handle.insert(product.handle.clone(), index).is_some() {
                return Err(CatalogError::DuplicateHandle(product.handle.clone()));
            }
        }

        Ok(Self {
            products,
            by_id,
            by_handle,
        })
    }

    /// Exact-match lookup by handle. `None` is a normal outcome.
    #[must_use]
    pub fn get_by_handle(&self, handle: &Handle) -> Option<&Product> {
        self.by_handle
            .get(handle)
            .and_then(|&index| self.products.get(index))
    }

    /// Exact-match lookup by product id. `None` is a normal outcome.
    #[must_use]
    pub fn get_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.by_id
            .get(id)
            .and_then(|&index| self.products.get(index))
    }

    /// All products belonging to the named collection, in catalog order.
    ///
    /// Returns an empty list when nothing matches.
    #[must_use]
    pub fn by_collection(&self, collection: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|product| product.in_collection(collection))
            .collect()
    }

    /// The full product list in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
