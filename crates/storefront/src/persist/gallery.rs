//! FIFO-capped gallery of virtual try-on captures.
//!
//! The try-on camera saves each capture as a data URL. Captures are large,
//! so the gallery enforces a maximum retained count on every save by
//! evicting the oldest entries first.

use std::sync::Arc;

use aurelia_core::Category;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{KeyValueStore, StoreError, TRYON_PHOTOS_KEY, load_state, save_state};

/// Default maximum number of retained captures.
pub const DEFAULT_PHOTO_CAP: usize = 20;

/// A single try-on capture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TryOnPhoto {
    /// Capture id.
    pub id: Uuid,
    /// Encoded image data URL.
    pub data_url: String,
    /// Title of the product being tried on.
    pub product_name: String,
    /// Category of the product being tried on.
    pub category: Category,
    /// Capture time.
    pub timestamp: DateTime<Utc>,
}

/// The capped capture gallery.
///
/// Entries are stored oldest-first; eviction drops from the front.
pub struct TryOnGallery {
    store: Arc<dyn KeyValueStore>,
    cap: usize,
}

impl TryOnGallery {
    /// Open the gallery over a durable store with the default cap.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self::with_cap(store, DEFAULT_PHOTO_CAP)
    }

    /// Open the gallery with an explicit cap. A cap of zero retains nothing.
    #[must_use]
    pub const fn with_cap(store: Arc<dyn KeyValueStore>, cap: usize) -> Self {
        Self { store, cap }
    }

    /// Current entries, oldest first. Corrupt or absent state reads as empty.
    #[must_use]
    pub fn photos(&self) -> Vec<TryOnPhoto> {
        load_state(self.store.as_ref(), TRYON_PHOTOS_KEY).unwrap_or_default()
    }

    /// Save a capture, evicting the oldest entries beyond the cap.
    ///
    /// Returns the saved photo's id.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the durable write fails; the gallery on
    /// disk is left at its previous contents in that case.
    pub fn save_photo(
        &self,
        data_url: impl Into<String>,
        product_name: impl Into<String>,
        category: Category,
    ) -> Result<Uuid, StoreError> {
        let photo = TryOnPhoto {
            id: Uuid::new_v4(),
            data_url: data_url.into(),
            product_name: product_name.into(),
            category,
            timestamp: Utc::now(),
        };
        let id = photo.id;

        let mut photos = self.photos();
        photos.push(photo);
        if photos.len() > self.cap {
            let excess = photos.len() - self.cap;
            photos.drain(..excess);
            debug!(evicted = excess, cap = self.cap, "evicted oldest captures");
        }

        save_state(self.store.as_ref(), TRYON_PHOTOS_KEY, &photos)?;
        Ok(id)
    }

    /// Delete a capture by id. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the durable write fails.
    pub fn delete_photo(&self, id: Uuid) -> Result<(), StoreError> {
        let mut photos = self.photos();
        let before = photos.len();
        photos.retain(|photo| photo.id != id);
        if photos.len() == before {
            return Ok(());
        }
        save_state(self.store.as_ref(), TRYON_PHOTOS_KEY, &photos)
    }

    /// Remove every capture.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the durable removal fails.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.store.remove(TRYON_PHOTOS_KEY)
    }
}
