//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `AURELIA_STATE_DIR` - Directory for durable engine state (default:
//!   `.aurelia/state`)
//! - `AURELIA_SYNC_URL` - Base URL of the wishlist account-sync endpoint;
//!   account sync is disabled when unset
//! - `AURELIA_SYNC_TOKEN` - Bearer token for the sync endpoint
//! - `AURELIA_PHOTO_CAP` - Maximum retained try-on captures (default: 20)

use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::persist::gallery::DEFAULT_PHOTO_CAP;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront core configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Directory holding the durable key-value slots.
    pub state_dir: PathBuf,
    /// Wishlist account-sync endpoint, when configured.
    pub sync: Option<SyncConfig>,
    /// Maximum retained try-on captures.
    pub photo_cap: usize,
}

/// Wishlist sync endpoint configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct SyncConfig {
    /// Base URL of the sync endpoint.
    pub base_url: Url,
    /// Bearer token, if the endpoint requires one.
    pub token: Option<SecretString>,
}

impl std::fmt::Debug for SyncConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file first if one is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a set variable fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let state_dir = std::env::var("AURELIA_STATE_DIR")
            .map_or_else(|_| PathBuf::from(".aurelia/state"), PathBuf::from);

        let sync = match std::env::var("AURELIA_SYNC_URL") {
            Ok(raw) => {
                let base_url = Url::parse(&raw).map_err(|e| {
                    ConfigError::InvalidEnvVar("AURELIA_SYNC_URL".to_owned(), e.to_string())
                })?;
                let token = std::env::var("AURELIA_SYNC_TOKEN")
                    .ok()
                    .map(SecretString::from);
                Some(SyncConfig { base_url, token })
            }
            Err(_) => None,
        };

        let photo_cap = match std::env::var("AURELIA_PHOTO_CAP") {
            Ok(raw) => raw.parse().map_err(|e: std::num::ParseIntError| {
                ConfigError::InvalidEnvVar("AURELIA_PHOTO_CAP".to_owned(), e.to_string())
            })?,
            Err(_) => DEFAULT_PHOTO_CAP,
        };

        Ok(Self {
            state_dir,
            sync,
            photo_cap,
        })
    }
}
