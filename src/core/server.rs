//! HTTP server assembly and lifecycle management.
//!
//! This module wires the domain services together into the application
//! state, builds the router from the domain route modules, and runs the
//! listener until shutdown.
//!
//! ## Route Architecture
//!
//! Each domain contributes its own `Router<AppState>` from its `routes`
//! module; this file only merges them and adds the cross-cutting pieces
//! (health check, CORS, request tracing).

use std::sync::Arc;

use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::config::Config;
use super::error::Result;
use crate::domains::chat::{ChatOrchestrator, ModelClient};
use crate::domains::todos::service::TodoService;
use crate::domains::todos::store::TodoStore;
use crate::domains::tools::ToolRegistry;
use crate::domains::{chat, todos};

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Service for todo CRUD and checklist operations.
    pub todos: Arc<TodoService>,

    /// Orchestrator for model conversations.
    pub chat: Arc<ChatOrchestrator>,
}

/// The main application server.
pub struct AppServer {
    config: Config,
    state: AppState,
}

impl AppServer {
    /// Open the configured database and wire the domain services over it.
    pub fn from_config(config: Config) -> Result<Self> {
        let store = Arc::new(TodoStore::open(&config.database.path)?);
        Ok(Self::new(config, store))
    }

    /// Wire the domain services over the given store.
    pub fn new(config: Config, store: Arc<TodoStore>) -> Self {
        let todos = Arc::new(TodoService::new(store));
        let registry = Arc::new(ToolRegistry::new(Arc::clone(&todos)));
        let client = ModelClient::new(config.ai.clone());
        let chat = Arc::new(ChatOrchestrator::new(client, registry));

        Self {
            config,
            state: AppState { todos, chat },
        }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.http.host, self.config.http.port)
    }

    /// Build the application router.
    pub fn router(&self) -> Router {
        let mut app = Router::new()
            .merge(todos::routes::router())
            .merge(chat::routes::router())
            .route("/health", get(health_check))
            .route("/", get(root_handler))
            .with_state(self.state.clone())
            .layer(TraceLayer::new_for_http());

        if self.config.http.enable_cors {
            let cors = CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any);
            app = app.layer(cors);
        }

        app
    }

    /// Run the HTTP server until ctrl-c.
    pub async fn run(self) -> Result<()> {
        let addr = self.address();
        let cors_status = if self.config.http.enable_cors {
            "enabled"
        } else {
            "disabled"
        };

        let app = self.router();
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Ready - listening on {} (CORS {})", addr, cors_status);
        info!("  → Todos:  /todos");
        info!("  → Chat:   POST /chat");
        info!("  → Health: GET /health");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}

/// Root handler - provides API info.
async fn root_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": "Todo Chat Server",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "todos": "/todos",
            "chat": "/chat",
            "health": "/health"
        }
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_server() -> AppServer {
        let store = Arc::new(TodoStore::open_in_memory().unwrap());
        AppServer::new(Config::default(), store)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn config_with_db(path: String) -> Config {
        Config {
            database: crate::core::config::DatabaseConfig { path },
            ..Config::default()
        }
    }

    #[test]
    fn test_from_config_opens_database() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_with_db(dir.path().join("todos.db").display().to_string());
        let server = AppServer::from_config(config).unwrap();
        assert!(
            server
                .state
                .todos
                .get_all_todos(Default::default())
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_from_config_surfaces_storage_error() {
        let config = config_with_db("/nonexistent-dir/todos.db".to_string());
        let err = AppServer::from_config(config).err().unwrap();
        assert!(matches!(err, crate::core::error::Error::Storage(_)));
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_server().router();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "healthy");
    }

    #[tokio::test]
    async fn test_todo_crud_over_http() {
        let server = test_server();

        // Create
        let response = server
            .router()
            .oneshot(
                Request::post("/todos")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        r#"{"title": "Buy milk", "priority": "high"}"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let id = json["todo"]["id"].as_str().unwrap().to_string();
        assert_eq!(json["todo"]["priority"], "high");

        // List
        let response = server
            .router()
            .oneshot(Request::get("/todos").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["todos"].as_array().unwrap().len(), 1);

        // Update
        let response = server
            .router()
            .oneshot(
                Request::put(format!("/todos/{id}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"completed": true}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["todo"]["completed"], true);

        // Delete
        let response = server
            .router()
            .oneshot(
                Request::delete(format!("/todos/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        // Gone
        let response = server
            .router()
            .oneshot(
                Request::get(format!("/todos/{id}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_validation_errors_are_structured() {
        let response = test_server()
            .router()
            .oneshot(
                Request::post("/todos")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"title": "   "}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["validationErrors"][0]["field"], "title");
    }

    #[tokio::test]
    async fn test_unknown_filter_is_rejected() {
        let response = test_server()
            .router()
            .oneshot(
                Request::get("/todos?filter=bogus")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_checklist_over_http() {
        let server = test_server();

        let response = server
            .router()
            .oneshot(
                Request::post("/todos")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"title": "Pack bags"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        let json = body_json(response).await;
        let id = json["todo"]["id"].as_str().unwrap().to_string();

        let response = server
            .router()
            .oneshot(
                Request::post(format!("/todos/{id}/checklist"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"text": "Passport"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        let item_id = json["addedItem"]["id"].as_str().unwrap().to_string();
        assert_eq!(json["addedItem"]["completed"], false);

        let response = server
            .router()
            .oneshot(
                Request::put(format!("/todos/{id}/checklist/{item_id}"))
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"completed": true}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["todo"]["checklist"][0]["completed"], true);
    }
}
