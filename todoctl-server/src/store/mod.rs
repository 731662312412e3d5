//! Todo storage behind a trait so handlers don't depend on Postgres

mod memory;
mod pg;

pub use memory::MemoryTodoStore;
pub use pg::PgTodoStore;

use async_trait::async_trait;

use crate::db::DbError;
use crate::models::{Paginated, Pagination, Todo, TodoText};

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// All todos, oldest first.
    async fn list(&self) -> Result<Vec<Todo>, DbError>;

    /// One page of todos, oldest first.
    async fn list_page(&self, page: Pagination) -> Result<Paginated<Todo>, DbError>;

    /// Insert a todo and return the stored record.
    async fn add(&self, text: TodoText) -> Result<Todo, DbError>;
}
