//! Domain identifier types with validation
//!
//! Newtype wrappers for catalog identifiers and tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog item identifier newtype wrapper
///
/// Item identifiers are stable for the lifetime of the catalog entry. New
/// identifiers are random UUIDs.
///
/// # Examples
///
/// ```
/// use retouch::domain::ids::ItemId;
/// use std::str::FromStr;
///
/// let id = ItemId::from_str("7d44b88c-4199-4bad-97dc-d78268e01398").unwrap();
/// assert_eq!(id.as_str(), "7d44b88c-4199-4bad-97dc-d78268e01398");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    /// Creates a new ItemId from a string
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Item ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Generates a fresh random identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the item ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes self and returns the inner String
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for ItemId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Prefix of tags used for internal bookkeeping; never copied to edited items.
pub const RESERVED_TAG_PREFIX: &str = "retouch|";

/// Catalog tag
///
/// Hierarchical tags use `|` between levels, e.g. `places|europe|lisbon`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Tag(String);

impl Tag {
    /// Creates a new Tag, rejecting blank names
    pub fn new(name: impl Into<String>) -> Result<Self, String> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err("Tag cannot be empty".to_string());
        }
        Ok(Self(name))
    }

    /// Returns the tag name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the tag lives in the reserved bookkeeping namespace
    pub fn is_reserved(&self) -> bool {
        self.0.starts_with(RESERVED_TAG_PREFIX)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}
