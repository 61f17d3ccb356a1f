//! Remote wishlist sync client.
//!
//! The wishlist engine talks to the account service through the
//! [`WishlistRemote`] trait: push a snapshot of product ids up, fetch the
//! account's list back. [`HttpWishlistRemote`] is the production
//! implementation; tests substitute an in-memory remote.

use aurelia_core::{ProductId, UserId};
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SyncConfig;

/// Errors that can occur when syncing with the account service.
///
/// A sync failure never touches local state; callers surface it as a
/// non-blocking notification.
#[derive(Debug, Error)]
pub enum SyncError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse the response or build the request.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// An atomically-taken snapshot of wishlist contents for transmission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistSnapshot {
    /// Product ids in wishlist order.
    pub product_ids: Vec<ProductId>,
    /// When the snapshot was taken.
    pub taken_at: DateTime<Utc>,
}

impl WishlistSnapshot {
    /// Snapshot the given ids now.
    #[must_use]
    pub fn now(product_ids: Vec<ProductId>) -> Self {
        Self {
            product_ids,
            taken_at: Utc::now(),
        }
    }
}

/// The account service seam used by the wishlist engine.
pub trait WishlistRemote: Send + Sync {
    /// Push a snapshot of the local wishlist to the account.
    fn push(
        &self,
        user_id: &UserId,
        snapshot: &WishlistSnapshot,
    ) -> impl Future<Output = Result<(), SyncError>> + Send;

    /// Fetch the account's wishlist as an ordered id list.
    fn fetch(
        &self,
        user_id: &UserId,
    ) -> impl Future<Output = Result<Vec<ProductId>, SyncError>> + Send;
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiWishlist {
    product_ids: Vec<ProductId>,
}

/// HTTP implementation of [`WishlistRemote`].
#[derive(Clone)]
pub struct HttpWishlistRemote {
    client: reqwest::Client,
    base_url: url::Url,
}

impl HttpWishlistRemote {
    /// Create a client for the configured sync endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError`] if the bearer token is malformed or the HTTP
    /// client fails to build.
    pub fn new(config: &SyncConfig) -> Result<Self, SyncError> {
        let mut headers = HeaderMap::new();

        if let Some(token) = &config.token {
            let auth_value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&auth_value)
                .map_err(|e| SyncError::Parse(format!("Invalid token format: {e}")))?;
            value.set_sensitive(true);
            headers.insert("Authorization", value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn wishlist_url(&self, user_id: &UserId) -> Result<url::Url, SyncError> {
        self.base_url
            .join(&format!("wishlists/{}", urlencoding::encode(user_id.as_str())))
            .map_err(|e| SyncError::Parse(format!("Invalid sync URL: {e}")))
    }
}

impl WishlistRemote for HttpWishlistRemote {
    async fn push(&self, user_id: &UserId, snapshot: &WishlistSnapshot) -> Result<(), SyncError> {
        let url = self.wishlist_url(user_id)?;
        let response = self.client.put(url).json(snapshot).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(())
    }

    async fn fetch(&self, user_id: &UserId) -> Result<Vec<ProductId>, SyncError> {
        let url = self.wishlist_url(user_id)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SyncError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_wishlist: ApiWishlist = response
            .json()
            .await
            .map_err(|e| SyncError::Parse(e.to_string()))?;
        Ok(api_wishlist.product_ids)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn config() -> SyncConfig {
        SyncConfig {
            base_url: url::Url::parse("https://sync.maison-aurelia.com/api/").unwrap(),
            token: Some(SecretString::from("tok-123")),
        }
    }

    #[test]
    fn test_client_builds() {
        assert!(HttpWishlistRemote::new(&config()).is_ok());
    }

    #[test]
    fn test_wishlist_url_encodes_user_id() {
        let remote = HttpWishlistRemote::new(&config()).unwrap();
        let url = remote.wishlist_url(&UserId::new("user with spaces")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://sync.maison-aurelia.com/api/wishlists/user%20with%20spaces"
        );
    }

    #[test]
    fn test_snapshot_serializes_ids_in_order() {
        let snapshot = WishlistSnapshot::now(vec![
            ProductId::new("prod-002"),
            ProductId::new("prod-001"),
        ]);
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            json.get("product_ids").unwrap(),
            &serde_json::json!(["prod-002", "prod-001"])
        );
    }

    #[test]
    fn test_remote_client_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<HttpWishlistRemote>();
    }
}
