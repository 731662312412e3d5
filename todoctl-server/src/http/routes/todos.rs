//! HTML todo page and form submission

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, Redirect},
    routing::{get, post},
    Router,
};
use serde::Deserialize;

use crate::http::error::ApiError;
use crate::http::extractors::ValidForm;
use crate::http::server::AppState;
use crate::http::views;
use crate::models::TodoText;

/// Form body of POST /add
#[derive(Debug, Deserialize)]
pub struct AddTodoForm {
    /// Missing field is treated like a blank one
    pub todo: Option<String>,
}

/// GET / - render every todo
async fn index(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let todos = state.store.list().await?;
    Ok(Html(views::render_index(&todos)))
}

/// POST /add - insert one todo, then send the browser back to the list
async fn add_todo(
    State(state): State<Arc<AppState>>,
    ValidForm(form): ValidForm<AddTodoForm>,
) -> Result<Redirect, ApiError> {
    let text = TodoText::new(form.todo.as_deref().unwrap_or_default())?;
    let todo = state.store.add(text).await?;
    tracing::info!(id = %todo.id, "todo added");

    Ok(Redirect::to("/"))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(index))
        .route("/add", post(add_todo))
}
