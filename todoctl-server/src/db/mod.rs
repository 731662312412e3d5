//! Database layer - connection pool, schema and repositories
//!
//! Every collection lives in a single `documents` table keyed by
//! collection name, with the document body stored as JSONB.

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::{DbError, DocumentRepo};
