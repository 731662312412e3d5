//! Collection name validation
//!
//! A collection is a named grouping of documents, stored in the
//! `collection` column of the `documents` table.

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use super::ValidationError;

/// Maximum length for collection names
const MAX_COLLECTION_LEN: usize = 63;

/// Identifier pattern: starts with a letter, then lowercase alphanumerics/underscores
static NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z][a-z0-9_]{0,62}$").expect("invalid collection regex")
});

/// Validated collection name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Collection(String);

impl Collection {
    /// Collection holding todo items.
    pub const TODOS: &'static str = "todos";

    /// Collection the seed command writes to unless told otherwise.
    pub const SEED_DEFAULT: &'static str = "by";

    /// Create a new collection name, validating its format.
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::Collection;
    ///
    /// assert!(Collection::new("todos").is_ok());
    /// assert!(Collection::new("Todos").is_err());  // uppercase
    /// assert!(Collection::new("1st").is_err());    // starts with digit
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        if s.is_empty() {
            return Err(ValidationError::Empty { field: "collection" });
        }

        if s.len() > MAX_COLLECTION_LEN {
            return Err(ValidationError::TooLong {
                field: "collection",
                max: MAX_COLLECTION_LEN,
            });
        }

        if !NAME_RE.is_match(s) {
            return Err(ValidationError::InvalidFormat {
                field: "collection",
                reason: "must be lowercase letters, digits or underscores, starting with a letter",
            });
        }

        Ok(Self(s.to_owned()))
    }

    /// The `todos` collection.
    pub fn todos() -> Self {
        Self(Self::TODOS.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Collection {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
