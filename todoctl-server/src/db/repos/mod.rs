//! Repository implementations for database access

pub mod documents;

pub use documents::DocumentRepo;

use uuid::Uuid;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("document {id} has unexpected shape: {reason}")]
    Decode { id: Uuid, reason: String },
}
