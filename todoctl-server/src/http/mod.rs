//! HTTP server layer
//!
//! Axum server with:
//! - HTML todo page and form handling
//! - JSON health and listing endpoints
//! - Request tracing and timeout
//! - Graceful shutdown

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;
pub mod views;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
