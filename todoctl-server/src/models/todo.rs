//! Todo items

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::ValidationError;

/// Maximum length for todo text, in characters
const MAX_TODO_LEN: usize = 1024;

/// Validated todo text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoText(String);

impl TodoText {
    /// Create todo text from raw form input.
    ///
    /// # Rules
    /// - Surrounding whitespace is trimmed
    /// - Must not be blank
    /// - Max 1024 characters
    ///
    /// # Example
    /// ```
    /// use todoctl_server::models::TodoText;
    ///
    /// assert_eq!(TodoText::new("  buy milk ").unwrap().as_str(), "buy milk");
    /// assert!(TodoText::new("   ").is_err());
    /// ```
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        let trimmed = s.trim();

        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: "todo" });
        }

        if trimmed.chars().count() > MAX_TODO_LEN {
            return Err(ValidationError::TooLong {
                field: "todo",
                max: MAX_TODO_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for TodoText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A stored todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
