//! Axum server setup
//!
//! Server skeleton with:
//! - Tracing middleware
//! - Per-request timeout
//! - Graceful shutdown on SIGTERM/Ctrl+C

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::routes;
use crate::store::TodoStore;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5000)
    pub bind_addr: SocketAddr,

    /// Per-request timeout (default: 30s)
    pub request_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

/// Build the application router with all routes.
pub fn build_router(store: Arc<dyn TodoStore>, config: &ServerConfig) -> Router {
    let state = AppState { store };

    Router::new()
        .merge(routes::todos::router())
        .merge(routes::api::router())
        .merge(routes::health::router())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Run the HTTP server until Ctrl+C or SIGTERM.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&database_url).await?;
/// let store = Arc::new(PgTodoStore::new(pool));
/// run_server(store, ServerConfig::default()).await?;
/// ```
pub async fn run_server(store: Arc<dyn TodoStore>, config: ServerConfig) -> Result<(), ServerError> {
    let app = build_router(store, &config);

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryTodoStore;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_app() -> (Router, Arc<MemoryTodoStore>) {
        let store = Arc::new(MemoryTodoStore::new());
        let app = build_router(store.clone(), &ServerConfig::default());
        (app, store)
    }

    fn post_form(body: &'static str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/add")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body))
            .unwrap()
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[test]
    fn default_config() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr.port(), 5000);
        assert!(config.bind_addr.ip().is_unspecified());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[tokio::test]
    async fn index_renders_empty_list() {
        let (app, _) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
        assert!(body_string(response).await.contains("Nothing to do yet."));
    }

    #[tokio::test]
    async fn add_redirects_and_item_is_listed() {
        let (app, store) = test_app();

        let response = app.clone().oneshot(post_form("todo=buy+milk")).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/");

        let todos = store.list().await.unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].text, "buy milk");

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert!(body_string(response).await.contains(">buy milk</li>"));
    }

    #[tokio::test]
    async fn add_rejects_blank_and_missing_field() {
        let (app, store) = test_app();

        for body in ["todo=+++", "other=value", ""] {
            let response = app.clone().oneshot(post_form(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body:?}");
        }

        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_requires_post() {
        let (app, _) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/add").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn api_lists_todos_paginated() {
        let (app, _) = test_app();

        for body in ["todo=one", "todo=two", "todo=three"] {
            app.clone().oneshot(post_form(body)).await.unwrap();
        }

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/todos?page=2&per_page=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["page"], 2);
        assert_eq!(json["items"][0]["todo"], "three");
    }

    async fn error_json(response: axum::response::Response) -> serde_json::Value {
        serde_json::from_str(&body_string(response).await).unwrap()
    }

    #[tokio::test]
    async fn add_without_content_type_is_json_400() {
        let (app, store) = test_app();

        let request = Request::builder()
            .method("POST")
            .uri("/add")
            .body(Body::from("todo=a"))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = error_json(response).await;
        assert_eq!(json["error"], "validation_error");
        assert!(json["message"].as_str().unwrap().starts_with("malformed form"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn add_with_duplicate_field_is_json_400() {
        let (app, store) = test_app();

        let response = app.oneshot(post_form("todo=a&todo=b")).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = error_json(response).await;
        assert_eq!(json["error"], "validation_error");
        assert!(json["message"].as_str().unwrap().contains("duplicate field"));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn api_rejects_bad_query_as_json_400() {
        let (app, _) = test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/todos?page=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = error_json(response).await;
        assert_eq!(json["error"], "validation_error");
        assert!(json["message"].as_str().unwrap().starts_with("malformed query"));
    }

    /// Store whose listing never finishes within the test timeout
    struct SlowStore;

    #[async_trait::async_trait]
    impl TodoStore for SlowStore {
        async fn list(&self) -> Result<Vec<crate::models::Todo>, crate::db::DbError> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok(Vec::new())
        }

        async fn list_page(
            &self,
            page: crate::models::Pagination,
        ) -> Result<crate::models::Paginated<crate::models::Todo>, crate::db::DbError> {
            Ok(page.apply::<crate::models::Todo>(&[]))
        }

        async fn add(
            &self,
            _text: crate::models::TodoText,
        ) -> Result<crate::models::Todo, crate::db::DbError> {
            unreachable!("not exercised")
        }
    }

    #[tokio::test]
    async fn slow_request_times_out_with_408() {
        let config = ServerConfig {
            request_timeout: Duration::from_millis(50),
            ..ServerConfig::default()
        };
        let app = build_router(Arc::new(SlowStore), &config);

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn health_endpoint() {
        let (app, _) = test_app();

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
