//! Raw documents as stored in a collection

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::FromRow;
use uuid::Uuid;

/// Document record
#[derive(Debug, Clone, FromRow)]
pub struct Document {
    pub id: Uuid,
    pub collection: String,
    pub body: JsonValue,
    pub created_at: DateTime<Utc>,
}

impl Document {
    /// Read a string field from the body.
    ///
    /// Returns None if the field is missing, null, or not a string.
    pub fn str_field(&self, field: &str) -> Option<&str> {
        self.body.get(field).and_then(JsonValue::as_str)
    }
}
