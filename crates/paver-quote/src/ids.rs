//! Newtype IDs for type-safe identifiers.
//!
//! Using a newtype prevents accidentally mixing SKU identifiers with other
//! strings (display names, slugs) flowing through the quote pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A stock keeping unit identifier, e.g. `colonial_classic:grey`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SkuId(String);

impl SkuId {
    /// Create a new ID from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume and return the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for SkuId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for SkuId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for SkuId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for SkuId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = SkuId::new("colonial_classic:grey");
        assert_eq!(id.as_str(), "colonial_classic:grey");
    }

    #[test]
    fn test_id_from_string() {
        let id: SkuId = "olde_towne:charcoal".into();
        assert_eq!(id.as_str(), "olde_towne:charcoal");
    }

    #[test]
    fn test_id_display() {
        let id = SkuId::new("sealant:5gal");
        assert_eq!(format!("{}", id), "sealant:5gal");
    }

    #[test]
    fn test_id_equality() {
        let id1 = SkuId::new("same");
        let id2 = SkuId::new("same");
        let id3 = SkuId::new("different");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
    }
}
