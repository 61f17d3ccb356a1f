//! URL-safe product handle type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Handle`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum HandleError {
    /// The input string is empty.
    #[error("handle cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("handle must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("handle contains invalid character '{0}'")]
    InvalidCharacter(char),
    /// The input starts or ends with a hyphen.
    #[error("handle cannot start or end with a hyphen")]
    EdgeHyphen,
}

/// A URL-safe product slug.
///
/// Handles are the external lookup key for catalog products and appear in
/// storefront URLs, so they are restricted to lowercase alphanumerics and
/// interior hyphens.
///
/// ## Examples
///
/// ```
/// use aurelia_core::Handle;
///
/// assert!(Handle::parse("aurora-signet-ring").is_ok());
/// assert!(Handle::parse("atelier-72").is_ok());
///
/// assert!(Handle::parse("").is_err());            // empty
/// assert!(Handle::parse("Aurora Ring").is_err()); // uppercase + space
/// assert!(Handle::parse("-ring").is_err());       // leading hyphen
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    /// Maximum length of a handle.
    pub const MAX_LENGTH: usize = 128;

    /// Parse a `Handle` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input:
    /// - Is empty
    /// - Is longer than 128 characters
    /// - Contains a character outside lowercase alphanumerics and hyphens
    /// - Starts or ends with a hyphen
    pub fn parse(s: &str) -> Result<Self, HandleError> {
        if s.is_empty() {
            return Err(HandleError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(HandleError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if let Some(bad) = s
            .chars()
            .find(|c| !(c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-'))
        {
            return Err(HandleError::InvalidCharacter(bad));
        }

        if s.starts_with('-') || s.ends_with('-') {
            return Err(HandleError::EdgeHyphen);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the handle as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Handle` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Handle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
