//! Wishlist engine: deduplicated product set with account sync.
//!
//! Local mutations are synchronous under the engine lock and mirrored to
//! the durable store. Account sync is asynchronous: a sync works on a
//! snapshot taken atomically at call time, the lock is released before any
//! I/O, and local mutations made while a sync is in flight are simply not
//! part of that snapshot. When two account loads race, the later call's
//! response wins and the earlier one is discarded.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use aurelia_core::{ProductId, UserId};
use tracing::{debug, warn};

use crate::catalog::{Catalog, Product};
use crate::error::{Result, StorefrontError};
use crate::persist::{KeyValueStore, WISHLIST_STATE_KEY, load_state, remove_logged, save_state};
use crate::sync::{WishlistRemote, WishlistSnapshot};

/// Outcome of an account load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched list replaced local state.
    Applied {
        /// Number of wishlist entries after the replace.
        entries: usize,
    },
    /// A newer load started while this one was in flight; its response was
    /// discarded without touching local state.
    Superseded,
}

/// Channels a wishlist can be shared on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareChannel {
    WhatsApp,
    X,
    Facebook,
    Email,
    /// A bare link for the copy-to-clipboard flow.
    Link,
}

/// A shareable representation of current wishlist contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    /// Channel the link targets.
    pub channel: ShareChannel,
    /// Fully-formed URL to open.
    pub url: String,
}

/// Public wishlist page base; shared links resolve against it.
const SHARE_BASE_URL: &str = "https://maison-aurelia.com/wishlist/shared";

struct Inner {
    entries: RwLock<Vec<Product>>,
    /// Monotonic ticket for account loads; only the newest applies.
    load_generation: AtomicU64,
    store: Arc<dyn KeyValueStore>,
}

/// The wishlist engine.
#[derive(Clone)]
pub struct WishlistEngine {
    inner: Arc<Inner>,
}

impl WishlistEngine {
    /// Create an empty wishlist over the given durable store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_entries(store, Vec::new())
    }

    /// Create a wishlist rehydrated from the durable store.
    ///
    /// Absent or corrupt state yields an empty wishlist.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let entries: Vec<Product> =
            load_state(store.as_ref(), WISHLIST_STATE_KEY).unwrap_or_default();
        if !entries.is_empty() {
            debug!(entries = entries.len(), "rehydrated wishlist state");
        }
        Self::with_entries(store, entries)
    }

    fn with_entries(store: Arc<dyn KeyValueStore>, entries: Vec<Product>) -> Self {
        Self {
            inner: Arc::new(Inner {
                entries: RwLock::new(entries),
                load_generation: AtomicU64::new(0),
                store,
            }),
        }
    }

    /// Add a product. Idempotent: an already-present id is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::LockPoisoned`] if the engine lock was
    /// poisoned.
    pub fn add_item(&self, product: Product) -> Result<()> {
        let mut entries = self
            .inner
            .entries
            .write()
            .map_err(|_| StorefrontError::LockPoisoned)?;

        if entries.iter().any(|entry| entry.id == product.id) {
            return Ok(());
        }

        debug!(product = %product.id, "added wishlist entry");
        entries.push(product);
        self.persist(&entries);
        Ok(())
    }

    /// Remove a product by id. Absent ids are a silent no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::LockPoisoned`] if the engine lock was
    /// poisoned.
    pub fn remove_item(&self, product_id: &ProductId) -> Result<()> {
        let mut entries = self
            .inner
            .entries
            .write()
            .map_err(|_| StorefrontError::LockPoisoned)?;

        let before = entries.len();
        entries.retain(|entry| &entry.id != product_id);
        if entries.len() != before {
            debug!(product = %product_id, "removed wishlist entry");
            self.persist(&entries);
        }
        Ok(())
    }

    /// Whether the product id is currently wishlisted.
    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.inner
            .entries
            .read()
            .map(|entries| entries.iter().any(|entry| &entry.id == product_id))
            .unwrap_or(false)
    }

    /// Empty the wishlist and clear its durable slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorefrontError::LockPoisoned`] if the engine lock was
    /// poisoned.
    pub fn clear(&self) -> Result<()> {
        let mut entries = self
            .inner
            .entries
            .write()
            .map_err(|_| StorefrontError::LockPoisoned)?;
        entries.clear();
        remove_logged(self.inner.store.as_ref(), WISHLIST_STATE_KEY);
        Ok(())
    }

    /// Snapshot of the current entries, in insertion order.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        self.inner
            .entries
            .read()
            .map(|entries| entries.clone())
            .unwrap_or_default()
    }

    /// Number of wishlist entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner
            .entries
            .read()
            .map(|entries| entries.len())
            .unwrap_or(0)
    }

    /// Whether the wishlist is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Push the current wishlist to the user's account.
    ///
    /// The snapshot is taken atomically at call time; the engine lock is
    /// not held across the network call, so local mutations made while the
    /// push is in flight are untouched and simply not part of this sync.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`SyncError`](crate::sync::SyncError) on
    /// network or API failure; local state is never affected by a failed
    /// push.
    pub async fn sync_to_account<R: WishlistRemote>(
        &self,
        remote: &R,
        user_id: &UserId,
    ) -> Result<WishlistSnapshot> {
        let snapshot = {
            let entries = self
                .inner
                .entries
                .read()
                .map_err(|_| StorefrontError::LockPoisoned)?;
            WishlistSnapshot::now(entries.iter().map(|entry| entry.id.clone()).collect())
        };

        remote.push(user_id, &snapshot).await.map_err(|error| {
            warn!(user = %user_id, %error, "wishlist push failed");
            StorefrontError::Sync(error)
        })?;

        debug!(user = %user_id, entries = snapshot.product_ids.len(), "wishlist pushed");
        Ok(snapshot)
    }

    /// Replace local state with the user's account wishlist.
    ///
    /// This is a full replace, never a merge; warning about unsynced local
    /// changes is the caller's responsibility. If a newer load starts while
    /// this one awaits the network, this call's response is discarded
    /// ([`LoadOutcome::Superseded`]).
    ///
    /// Fetched ids that no longer resolve in the catalog are dropped with a
    /// log line - a missed lookup is not an error.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`SyncError`](crate::sync::SyncError) on
    /// network or API failure; local state is unaffected.
    pub async fn load_from_account<R: WishlistRemote>(
        &self,
        remote: &R,
        user_id: &UserId,
        catalog: &Catalog,
    ) -> Result<LoadOutcome> {
        let ticket = self
            .inner
            .load_generation
            .fetch_add(1, Ordering::SeqCst)
            .wrapping_add(1);

        let product_ids = remote.fetch(user_id).await.map_err(|error| {
            warn!(user = %user_id, %error, "wishlist fetch failed");
            StorefrontError::Sync(error)
        })?;

        if self.inner.load_generation.load(Ordering::SeqCst) != ticket {
            debug!(user = %user_id, "discarding superseded wishlist load");
            return Ok(LoadOutcome::Superseded);
        }

        let mut resolved = Vec::with_capacity(product_ids.len());
        for product_id in product_ids {
            match catalog.get_by_id(&product_id) {
                Some(product) => resolved.push(product.clone()),
                None => warn!(product = %product_id, "fetched wishlist id not in catalog"),
            }
        }

        let mut entries = self
            .inner
            .entries
            .write()
            .map_err(|_| StorefrontError::LockPoisoned)?;
        // Re-check under the write lock: a newer load may have applied
        // between the fetch returning and this lock being acquired.
        if self.inner.load_generation.load(Ordering::SeqCst) != ticket {
            debug!(user = %user_id, "discarding superseded wishlist load");
            return Ok(LoadOutcome::Superseded);
        }
        *entries = resolved;
        self.persist(&entries);
        debug!(user = %user_id, entries = entries.len(), "wishlist replaced from account");
        Ok(LoadOutcome::Applied {
            entries: entries.len(),
        })
    }

    /// Build a shareable link for the current wishlist contents.
    ///
    /// Pure function of current state: no mutation, no persistence.
    #[must_use]
    pub fn share_payload(&self, channel: ShareChannel) -> ShareLink {
        let ids: Vec<String> = self
            .products()
            .into_iter()
            .map(|product| product.id.into_inner())
            .collect();
        let wishlist_url = format!(
            "{SHARE_BASE_URL}?items={}",
            urlencoding::encode(&ids.join(","))
        );

        let url = match channel {
            ShareChannel::WhatsApp => format!(
                "https://wa.me/?text={}",
                urlencoding::encode(&format!("My Aurelia wishlist: {wishlist_url}"))
            ),
            ShareChannel::X => format!(
                "https://x.com/intent/post?text={}&url={}",
                urlencoding::encode("My Aurelia wishlist"),
                urlencoding::encode(&wishlist_url)
            ),
            ShareChannel::Facebook => format!(
                "https://www.facebook.com/sharer/sharer.php?u={}",
                urlencoding::encode(&wishlist_url)
            ),
            ShareChannel::Email => format!(
                "mailto:?subject={}&body={}",
                urlencoding::encode("My Aurelia wishlist"),
                urlencoding::encode(&wishlist_url)
            ),
            ShareChannel::Link => wishlist_url,
        };

        ShareLink { channel, url }
    }

    fn persist(&self, entries: &[Product]) {
        if let Err(error) = save_state(self.inner.store.as_ref(), WISHLIST_STATE_KEY, &entries) {
            warn!(%error, "failed to persist wishlist state");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::catalog::seed_catalog;
    use crate::persist::MemoryStore;

    use super::*;

    fn engine() -> WishlistEngine {
        WishlistEngine::new(Arc::new(MemoryStore::new()))
    }

    fn nth_product(n: usize) -> Product {
        seed_catalog().products().get(n).unwrap().clone()
    }

    #[test]
    fn test_add_is_idempotent() {
        let wishlist = engine();
        let product = nth_product(0);

        wishlist.add_item(product.clone()).unwrap();
        wishlist.add_item(product.clone()).unwrap();

        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.is_in_wishlist(&product.id));
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let wishlist = engine();
        wishlist.add_item(nth_product(0)).unwrap();
        wishlist.remove_item(&ProductId::new("ghost")).unwrap();
        assert_eq!(wishlist.len(), 1);
    }

    #[test]
    fn test_clear_empties() {
        let wishlist = engine();
        wishlist.add_item(nth_product(0)).unwrap();
        wishlist.add_item(nth_product(1)).unwrap();
        wishlist.clear().unwrap();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let wishlist = engine();
        let a = nth_product(2);
        let b = nth_product(0);
        wishlist.add_item(a.clone()).unwrap();
        wishlist.add_item(b.clone()).unwrap();

        let ids: Vec<ProductId> = wishlist.products().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn test_state_survives_reload() {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        {
            let wishlist = WishlistEngine::new(Arc::clone(&store));
            wishlist.add_item(nth_product(0)).unwrap();
        }
        let reloaded = WishlistEngine::load(store);
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn test_share_link_contains_ids() {
        let wishlist = engine();
        wishlist.add_item(nth_product(0)).unwrap();
        wishlist.add_item(nth_product(1)).unwrap();

        let link = wishlist.share_payload(ShareChannel::Link);
        assert!(link.url.contains("prod-001"));
        assert!(link.url.contains("prod-002"));
        // Comma between ids is percent-encoded
        assert!(link.url.contains("prod-001%2Cprod-002"));
    }

    #[test]
    fn test_share_is_pure() {
        let wishlist = engine();
        wishlist.add_item(nth_product(0)).unwrap();
        let before = wishlist.products();
        let _ = wishlist.share_payload(ShareChannel::WhatsApp);
        let _ = wishlist.share_payload(ShareChannel::Email);
        assert_eq!(wishlist.products(), before);
    }
}
