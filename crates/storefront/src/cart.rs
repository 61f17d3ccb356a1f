//! Cart engine: quantity-keyed line items over catalog products.
//!
//! The engine is a cheap-to-clone handle; the UI host constructs one at
//! startup and injects it into page components. Local mutations are
//! synchronous and atomic under the engine lock, and each one mirrors the
//! line list into the durable store before returning. Totals are derived
//! fresh on every read - nothing is cached.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use aurelia_core::ProductId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::Product;
use crate::error::{Result, StorefrontError};
use crate::persist::{CART_STATE_KEY, KeyValueStore, load_state, remove_logged, save_state};

/// A (product, quantity) pair within the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The product on this line.
    pub product: Product,
    /// Number of units. Always >= 1; a line that would drop to 0 is removed.
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal: unit price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.product.price.amount() * Decimal::from(self.quantity)
    }
}

struct Inner {
    lines: RwLock<Vec<CartLine>>,
    /// Drawer visibility. UI state only - never persisted, never part of totals.
    open: AtomicBool,
    store: Arc<dyn KeyValueStore>,
}

/// The cart engine.
#[derive(Clone)]
pub struct CartEngine {
    inner: Arc<Inner>,
}

impl CartEngine {
    /// Create an empty cart over the given durable store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            inner: Arc::new(Inner {
                lines: RwLock::new(Vec::new()),
                open: AtomicBool::new(false),
                store,
            }),
        }
    }

    /// Create a cart rehydrated from the durable store.
    ///
    /// Absent or corrupt state yields an empty cart.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let lines: Vec<CartLine> = load_state(store.as_ref(), CART_STATE_KEY).unwrap_or_default();
        if !lines.is_empty() {
            debug!(lines = lines.len(), "rehydrated cart state");
        }
        Self {
            inner: Arc::new(Inner {
                lines: RwLock::new(lines),
                open: AtomicBool::new(false),
                store,
            }),
        }
    }

    /// Add `quantity` units of `product`.
    ///
    /// Merges into the existing line for the same product id if present,
    /// otherwise appends a new line. A quantity of 0 is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::LockPoisoned`] if the engine lock was
    /// poisoned by a panicking thread.
    pub fn add_item(&self, product: Product, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return Ok(());
        }

        let mut lines = self
            .inner
            .lines
            .write()
            .map_err(|_| StorefrontError::LockPoisoned)?;

        if let Some(line) = lines.iter_mut().find(|line| line.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            debug!(product = %product.id, quantity = line.quantity, "merged cart line");
        } else {
            debug!(product = %product.id, quantity, "added cart line");
            lines.push(CartLine { product, quantity });
        }

        self.persist(&lines);
        Ok(())
    }

    /// Remove the line for `product_id`. Absent ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::LockPoisoned`] if the engine lock was
    /// poisoned.
    pub fn remove_item(&self, product_id: &ProductId) -> Result<()> {
        let mut lines = self
            .inner
            .lines
            .write()
            .map_err(|_| StorefrontError::LockPoisoned)?;

        let before = lines.len();
        lines.retain(|line| &line.product.id != product_id);
        if lines.len() != before {
            debug!(product = %product_id, "removed cart line");
            self.persist(&lines);
        }
        Ok(())
    }

    /// Set the quantity for `product_id` exactly.
    ///
    /// A quantity of 0 behaves as removal; an unknown id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::LockPoisoned`] if the engine lock was
    /// poisoned.
    pub fn set_quantity(&self, product_id: &ProductId, quantity: u32) -> Result<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }

        let mut lines = self
            .inner
            .lines
            .write()
            .map_err(|_| StorefrontError::LockPoisoned)?;

        if let Some(line) = lines.iter_mut().find(|line| &line.product.id == product_id) {
            line.quantity = quantity;
            debug!(product = %product_id, quantity, "set cart line quantity");
            self.persist(&lines);
        }
        Ok(())
    }

    /// Empty the cart and clear its durable slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::LockPoisoned`] if the engine lock was
    /// poisoned.
    pub fn clear(&self) -> Result<()> {
        let mut lines = self
            .inner
            .lines
            .write()
            .map_err(|_| StorefrontError::LockPoisoned)?;
        lines.clear();
        remove_logged(self.inner.store.as_ref(), CART_STATE_KEY);
        Ok(())
    }

    /// Snapshot of the current lines, in insertion order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        self.inner
            .lines
            .read()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_items(&self) -> u32 {
        self.inner
            .lines
            .read()
            .map(|lines| lines.iter().map(|line| line.quantity).sum())
            .unwrap_or(0)
    }

    /// Sum of price times quantity across all lines, computed fresh.
    #[must_use]
    pub fn total_price(&self) -> Decimal {
        self.inner
            .lines
            .read()
            .map(|lines| lines.iter().map(CartLine::subtotal).sum())
            .unwrap_or_default()
    }

    /// Whether the cart drawer is open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner.open.load(Ordering::Relaxed)
    }

    /// Show or hide the cart drawer. Does not touch line state or storage.
    pub fn set_open(&self, open: bool) {
        self.inner.open.store(open, Ordering::Relaxed);
    }

    /// Mirror the line list into the durable store. The in-memory state is
    /// authoritative, so a failed write is logged and not surfaced.
    fn persist(&self, lines: &[CartLine]) {
        if let Err(error) = save_state(self.inner.store.as_ref(), CART_STATE_KEY, &lines) {
            warn!(%error, "failed to persist cart state");
        }
    }
}
