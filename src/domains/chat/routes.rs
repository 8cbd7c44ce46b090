//! HTTP surface of the chat domain.

use axum::Json;
use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::Router;
use serde::Deserialize;
use serde_json::json;
use tokio_stream::StreamExt;
use tracing::error;

use super::error::ChatError;
use super::protocol::ChatMessage;
use crate::core::server::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/chat", post(chat))
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    messages: Vec<ChatMessage>,
}

/// Stream a model response for the given conversation.
///
/// Tokens are relayed as plain text as the model produces them. A failure
/// on the very first model invocation comes back as a JSON error response;
/// a failure mid-stream can only terminate the body early.
async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    match state.chat.handle_chat(request.messages).await {
        Ok(stream) => {
            let body = Body::from_stream(stream.map(|item| {
                item.map_err(|err| {
                    error!("Chat stream failed: {err}");
                    std::io::Error::other(err.to_string())
                })
            }));
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
                body,
            )
                .into_response()
        }
        Err(err) => {
            error!("Chat request failed: {err}");
            let status = match &err {
                ChatError::Api { .. } | ChatError::Http(_) => StatusCode::BAD_GATEWAY,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            };
            (status, Json(json!({ "error": err.to_string() }))).into_response()
        }
    }
}
