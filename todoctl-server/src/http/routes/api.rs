//! JSON todo listing

use std::sync::Arc;

use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::http::error::ApiError;
use crate::http::extractors::ValidQuery;
use crate::http::server::AppState;
use crate::models::{Paginated, Pagination, PaginationParams, Todo};

#[derive(Serialize)]
pub struct TodoResponse {
    pub id: String,
    pub todo: String,
    pub created_at: String,
}

impl From<Todo> for TodoResponse {
    fn from(t: Todo) -> Self {
        Self {
            id: t.id.to_string(),
            todo: t.text,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

/// GET /api/todos - paginated todo list
async fn list_todos(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<PaginationParams>,
) -> Result<Json<Paginated<TodoResponse>>, ApiError> {
    let page = Pagination::from(params);
    let result = state.store.list_page(page).await?;

    Ok(Json(result.map(TodoResponse::from)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/api/todos", get(list_todos))
}
