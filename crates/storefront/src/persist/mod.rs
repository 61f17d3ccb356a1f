//! Durable key-value mirror of engine state.
//!
//! The persistence adapter is never the source of truth while the process
//! is running: engines write through on every mutation and read back once
//! at startup. A corrupt or unavailable slot is treated as absent state -
//! logged, never fatal.

pub mod gallery;

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::warn;

pub use gallery::{TryOnGallery, TryOnPhoto};

/// Durable slot for cart line state.
pub const CART_STATE_KEY: &str = "cart-state";
/// Durable slot for wishlist state.
pub const WISHLIST_STATE_KEY: &str = "wishlist-state";
/// Durable slot for the try-on photo gallery.
pub const TRYON_PHOTOS_KEY: &str = "tryon-photos";

/// Errors that can occur against the durable store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// State could not be serialized.
    #[error("Serialize error: {0}")]
    Serialize(String),

    /// The store lock was poisoned.
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// Key contains characters the store cannot represent.
    #[error("Invalid store key: {0}")]
    InvalidKey(String),
}

/// A generic durable string store, namespaced by key.
///
/// This is the seam to the host's storage substrate (browser local storage,
/// a state directory on disk, an in-memory double in tests). All engine
/// instances within a client share one store; collisions are avoided by the
/// per-engine key constants above.
pub trait KeyValueStore: Send + Sync {
    /// Read the value at `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] only for substrate failures; a missing key is
    /// `Ok(None)`.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` at `key`, overwriting any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the substrate rejects the write.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Clear the slot at `key` entirely. Removing a missing key is a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the substrate rejects the removal.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Serialize `state` as JSON into the slot at `key`.
///
/// # Errors
///
/// Returns [`StoreError`] if serialization or the write fails.
pub fn save_state<T: Serialize>(
    store: &dyn KeyValueStore,
    key: &str,
    state: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(state).map_err(|e| StoreError::Serialize(e.to_string()))?;
    store.set(key, &json)
}

/// Load and deserialize the state at `key`.
///
/// A missing slot, an unreadable store, and a corrupt payload all yield
/// `None` so the caller falls back to its empty initial state. Corruption
/// and store failures are logged.
pub fn load_state<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(error) => {
            warn!(key, %error, "durable store unavailable, starting empty");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(state) => Some(state),
        Err(error) => {
            warn!(key, %error, "stored state corrupt, starting empty");
            None
        }
    }
}

/// In-memory store, used by tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let slots = self.slots.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut slots = self.slots.lock().map_err(|_| StoreError::LockPoisoned)?;
        slots.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut slots = self.slots.lock().map_err(|_| StoreError::LockPoisoned)?;
        slots.remove(key);
        Ok(())
    }
}

/// File-backed store: one JSON file per key under a state directory.
///
/// Writes go through a temp file and rename so a crash mid-write leaves the
/// previous value intact rather than a truncated slot.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf, StoreError> {
        // Keys are engine-controlled constants, but reject separators anyway
        // so a bad key cannot escape the state directory.
        if key.is_empty()
            || !key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            return Err(StoreError::InvalidKey(key.to_owned()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.slot_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Best-effort removal helper shared by the engines' `clear` paths.
pub(crate) fn remove_logged(store: &dyn KeyValueStore, key: &str) {
    if let Err(error) = store.remove(key) {
        warn!(key, %error, "failed to clear durable slot");
    }
}
