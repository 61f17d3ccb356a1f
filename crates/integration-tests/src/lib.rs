//! Shared fixtures for the Aurelia integration tests.
//!
//! Tests run fully in-process: engines over an in-memory durable store and
//! a scripted stand-in for the account-sync endpoint. Nothing here talks to
//! the network.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use aurelia_core::{ProductId, UserId};
use aurelia_storefront::catalog::{Catalog, seed_catalog};
use aurelia_storefront::persist::{KeyValueStore, MemoryStore};
use aurelia_storefront::sync::{SyncError, WishlistRemote, WishlistSnapshot};
use tokio::sync::Mutex as AsyncMutex;
use tokio::sync::mpsc;

/// Fresh in-memory durable store.
#[must_use]
pub fn memory_store() -> Arc<dyn KeyValueStore> {
    Arc::new(MemoryStore::new())
}

/// The seed catalog every scenario runs against.
#[must_use]
pub fn catalog() -> Catalog {
    seed_catalog()
}

/// In-memory account-sync endpoint that completes immediately.
#[derive(Default)]
pub struct MemoryRemote {
    lists: Mutex<HashMap<UserId, Vec<ProductId>>>,
    pushes: Mutex<Vec<WishlistSnapshot>>,
}

impl MemoryRemote {
    /// Create an empty remote.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-load an account's wishlist.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn seed_account(&self, user_id: &UserId, product_ids: Vec<ProductId>) {
        self.lists
            .lock()
            .expect("remote lock")
            .insert(user_id.clone(), product_ids);
    }

    /// Snapshots received by `push`, in arrival order.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn pushed(&self) -> Vec<WishlistSnapshot> {
        self.pushes.lock().expect("remote lock").clone()
    }
}

impl WishlistRemote for MemoryRemote {
    async fn push(&self, user_id: &UserId, snapshot: &WishlistSnapshot) -> Result<(), SyncError> {
        let mut lists = self.lists.lock().map_err(|_| SyncError::Api {
            status: 500,
            message: "remote lock poisoned".to_owned(),
        })?;
        lists.insert(user_id.clone(), snapshot.product_ids.clone());
        drop(lists);

        self.pushes
            .lock()
            .map_err(|_| SyncError::Api {
                status: 500,
                message: "remote lock poisoned".to_owned(),
            })?
            .push(snapshot.clone());
        Ok(())
    }

    async fn fetch(&self, user_id: &UserId) -> Result<Vec<ProductId>, SyncError> {
        let lists = self.lists.lock().map_err(|_| SyncError::Api {
            status: 500,
            message: "remote lock poisoned".to_owned(),
        })?;
        lists.get(user_id).cloned().ok_or(SyncError::Api {
            status: 404,
            message: "no wishlist for account".to_owned(),
        })
    }
}

/// Account-sync endpoint that parks every operation until the test releases
/// it. Used to interleave local mutations with in-flight sync calls.
pub struct GatedRemote {
    inner: MemoryRemote,
    gate: AsyncMutex<mpsc::Receiver<()>>,
}

impl GatedRemote {
    /// Create a gated remote and the sender that releases its operations,
    /// one message per parked call.
    #[must_use]
    pub fn new() -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel(8);
        (
            Self {
                inner: MemoryRemote::new(),
                gate: AsyncMutex::new(rx),
            },
            tx,
        )
    }

    /// Pre-load an account's wishlist on the underlying remote.
    pub fn seed_account(&self, user_id: &UserId, product_ids: Vec<ProductId>) {
        self.inner.seed_account(user_id, product_ids);
    }

    /// Snapshots received by `push`, in arrival order.
    #[must_use]
    pub fn pushed(&self) -> Vec<WishlistSnapshot> {
        self.inner.pushed()
    }

    async fn wait(&self) -> Result<(), SyncError> {
        self.gate.lock().await.recv().await.ok_or(SyncError::Api {
            status: 499,
            message: "gate closed".to_owned(),
        })
    }
}

impl WishlistRemote for GatedRemote {
    async fn push(&self, user_id: &UserId, snapshot: &WishlistSnapshot) -> Result<(), SyncError> {
        self.wait().await?;
        self.inner.push(user_id, snapshot).await
    }

    async fn fetch(&self, user_id: &UserId) -> Result<Vec<ProductId>, SyncError> {
        self.wait().await?;
        self.inner.fetch(user_id).await
    }
}

/// Remote that always fails, for error-path tests.
pub struct FailingRemote;

impl WishlistRemote for FailingRemote {
    async fn push(&self, _: &UserId, _: &WishlistSnapshot) -> Result<(), SyncError> {
        Err(SyncError::Api {
            status: 503,
            message: "account service unavailable".to_owned(),
        })
    }

    async fn fetch(&self, _: &UserId) -> Result<Vec<ProductId>, SyncError> {
        Err(SyncError::Api {
            status: 503,
            message: "account service unavailable".to_owned(),
        })
    }
}
