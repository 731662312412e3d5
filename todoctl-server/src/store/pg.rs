use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;

use super::TodoStore;
use crate::db::{DbError, DocumentRepo};
use crate::models::{Collection, Document, Paginated, Pagination, Todo, TodoText};

/// Body field holding the todo text
const TODO_FIELD: &str = "todo";

/// Todos stored as `{"todo": text}` documents in the `todos` collection
#[derive(Clone)]
pub struct PgTodoStore {
    pool: PgPool,
    collection: Collection,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            collection: Collection::todos(),
        }
    }
}

/// Map a document to a todo, or None if its body has no text.
///
/// Older rows may carry `{"todo": null}` from form posts without the field.
fn to_todo(doc: Document) -> Option<Todo> {
    match doc.str_field(TODO_FIELD) {
        Some(text) => Some(Todo {
            id: doc.id,
            text: text.to_owned(),
            created_at: doc.created_at,
        }),
        None => {
            let err = DbError::Decode {
                id: doc.id,
                reason: format!("missing string field '{}'", TODO_FIELD),
            };
            tracing::warn!("skipping todo: {}", err);
            None
        }
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, DbError> {
        let docs = DocumentRepo::new(&self.pool).find(&self.collection).await?;
        Ok(docs.into_iter().filter_map(to_todo).collect())
    }

    async fn list_page(&self, page: Pagination) -> Result<Paginated<Todo>, DbError> {
        let docs = DocumentRepo::new(&self.pool)
            .find_page(&self.collection, Some(TODO_FIELD), page)
            .await?;

        Ok(Paginated {
            items: docs.items.into_iter().filter_map(to_todo).collect(),
            total: docs.total,
            page: docs.page,
            per_page: docs.per_page,
        })
    }

    async fn add(&self, text: TodoText) -> Result<Todo, DbError> {
        let doc = DocumentRepo::new(&self.pool)
            .insert_one(&self.collection, json!({ TODO_FIELD: text.as_str() }))
            .await?;

        let id = doc.id;
        to_todo(doc).ok_or_else(|| DbError::Decode {
            id,
            reason: "inserted document lost its text".into(),
        })
    }
}
