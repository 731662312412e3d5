use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::TodoStore;
use crate::db::DbError;
use crate::models::{Paginated, Pagination, Todo, TodoText};

/// In-process store, used by router tests and `serve --in-memory`
#[derive(Default)]
pub struct MemoryTodoStore {
    todos: RwLock<Vec<Todo>>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, DbError> {
        Ok(self.todos.read().await.clone())
    }

    async fn list_page(&self, page: Pagination) -> Result<Paginated<Todo>, DbError> {
        let todos = self.todos.read().await;
        Ok(page.apply(todos.as_slice()))
    }

    async fn add(&self, text: TodoText) -> Result<Todo, DbError> {
        let todo = Todo {
            id: Uuid::new_v4(),
            text: text.into_string(),
            created_at: Utc::now(),
        };
        self.todos.write().await.push(todo.clone());
        Ok(todo)
    }
}
