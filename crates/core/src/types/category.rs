//! Product category tags.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when a category string is not recognized.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown category: {0}")]
pub struct CategoryError(pub String);

/// Product category.
///
/// Categories are a closed set: the storefront navigation and the filter
/// engine both enumerate them, so free-text classification lives on the
/// product's `material` field instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rings,
    Earrings,
    Necklaces,
    Bangles,
    Bracelets,
    Eyewear,
}

impl Category {
    /// All categories, in storefront navigation order.
    pub const ALL: [Self; 6] = [
        Self::Rings,
        Self::Earrings,
        Self::Necklaces,
        Self::Bangles,
        Self::Bracelets,
        Self::Eyewear,
    ];

    /// Lowercase tag used in URLs and filters.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rings => "rings",
            Self::Earrings => "earrings",
            Self::Necklaces => "necklaces",
            Self::Bangles => "bangles",
            Self::Bracelets => "bracelets",
            Self::Eyewear => "eyewear",
        }
    }

    /// Parse from a tag string, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`CategoryError`] if the tag is not a known category.
    pub fn parse(s: &str) -> Result<Self, CategoryError> {
        match s.to_ascii_lowercase().as_str() {
            "rings" => Ok(Self::Rings),
            "earrings" => Ok(Self::Earrings),
            "necklaces" => Ok(Self::Necklaces),
            "bangles" => Ok(Self::Bangles),
            "bracelets" => Ok(Self::Bracelets),
            "eyewear" => Ok(Self::Eyewear),
            other => Err(CategoryError(other.to_owned())),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
