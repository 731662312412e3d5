//! todoctl-server: todo list web app backed by Postgres
//!
//! Todos are documents in the `todos` collection. `GET /` renders them,
//! `POST /add` inserts one from a form submission.

pub mod db;
pub mod http;
pub mod models;
pub mod store;

pub use db::{create_pool, DbError};
pub use http::{run_server, ServerConfig, ServerError};
pub use store::{MemoryTodoStore, PgTodoStore, TodoStore};
