//! REST routes for the todos resource.
//!
//! Thin request parsing and response formatting over the todo service.
//! Service errors map to HTTP statuses here: validation to 400, missing
//! records to 404, storage failures to 500.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use super::error::TodoError;
use super::model::{
    ChecklistItemUpdate, CreateTodoData, PriorityFilter, StatusFilter, TodoFilters, UpdateTodoData,
};
use crate::core::server::AppState;

/// Build the `/todos` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/todos", get(list_todos).post(create_todo))
        .route(
            "/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .route("/todos/{id}/checklist", post(add_checklist_item))
        .route(
            "/todos/{id}/checklist/{item_id}",
            axum::routing::put(update_checklist_item).delete(remove_checklist_item),
        )
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Debug, Default, Deserialize)]
struct ListQuery {
    filter: Option<String>,
    priority: Option<String>,
}

#[instrument(skip(state))]
async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let filters = match parse_filters(&query) {
        Ok(filters) => filters,
        Err(response) => return response,
    };

    match state.todos.get_all_todos(filters) {
        Ok(todos) => Json(json!({ "todos": todos })).into_response(),
        Err(err) => error_response(&err),
    }
}

#[instrument(skip_all)]
async fn create_todo(
    State(state): State<AppState>,
    Json(data): Json<CreateTodoData>,
) -> Response {
    match state.todos.create_todo(data) {
        Ok(todo) => (StatusCode::CREATED, Json(json!({ "todo": todo }))).into_response(),
        Err(err) => error_response(&err),
    }
}

#[instrument(skip(state))]
async fn get_todo(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.todos.get_todo_by_id(&id) {
        Ok(todo) => Json(json!({ "todo": todo })).into_response(),
        Err(err) => error_response(&err),
    }
}

#[instrument(skip(state, patch))]
async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<UpdateTodoData>,
) -> Response {
    match state.todos.update_todo(&id, patch) {
        Ok(todo) => Json(json!({ "todo": todo })).into_response(),
        Err(err) => error_response(&err),
    }
}

#[instrument(skip(state))]
async fn delete_todo(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.todos.delete_todo(&id) {
        Ok(()) => Json(json!({ "message": "Todo deleted successfully" })).into_response(),
        Err(err) => error_response(&err),
    }
}

#[derive(Debug, Deserialize)]
struct AddItemBody {
    #[serde(default)]
    text: String,
}

#[instrument(skip(state, body))]
async fn add_checklist_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<AddItemBody>,
) -> Response {
    match state.todos.add_checklist_item(&id, &body.text) {
        Ok((todo, item)) => (
            StatusCode::CREATED,
            Json(json!({ "todo": todo, "addedItem": item })),
        )
            .into_response(),
        Err(err) => error_response(&err),
    }
}

#[derive(Debug, Deserialize)]
struct ItemUpdateBody {
    text: Option<String>,
    completed: Option<bool>,
}

#[instrument(skip(state, body))]
async fn update_checklist_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
    Json(body): Json<ItemUpdateBody>,
) -> Response {
    let update = ChecklistItemUpdate {
        id: item_id,
        text: body.text,
        completed: body.completed,
    };
    match state.todos.update_checklist_item(&id, update) {
        Ok(todo) => Json(json!({ "todo": todo })).into_response(),
        Err(err) => error_response(&err),
    }
}

#[instrument(skip(state))]
async fn remove_checklist_item(
    State(state): State<AppState>,
    Path((id, item_id)): Path<(String, String)>,
) -> Response {
    match state.todos.remove_checklist_item(&id, &item_id) {
        Ok(todo) => Json(json!({ "todo": todo })).into_response(),
        Err(err) => error_response(&err),
    }
}

// ============================================================================
// Mapping helpers
// ============================================================================

fn parse_filters(query: &ListQuery) -> Result<TodoFilters, Response> {
    let status = match query.filter.as_deref() {
        None => StatusFilter::All,
        Some(raw) => StatusFilter::parse(raw).ok_or_else(|| {
            bad_request(format!("Unknown filter {raw:?}; expected all, completed, or pending"))
        })?,
    };
    let priority = match query.priority.as_deref() {
        None => PriorityFilter::All,
        Some(raw) => PriorityFilter::parse(raw).ok_or_else(|| {
            bad_request(format!("Unknown priority {raw:?}; expected all, low, medium, or high"))
        })?,
    };
    Ok(TodoFilters { status, priority })
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(json!({ "error": message }))).into_response()
}

/// Render a service error as a JSON error body with the matching status.
pub(crate) fn error_response(err: &TodoError) -> Response {
    let (status, body) = match err {
        TodoError::Validation(errors) => (
            StatusCode::BAD_REQUEST,
            json!({ "error": err.to_string(), "validationErrors": errors.0 }),
        ),
        TodoError::TodoNotFound | TodoError::ItemNotFound => {
            (StatusCode::NOT_FOUND, json!({ "error": err.to_string() }))
        }
        TodoError::Storage(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": err.to_string() }),
        ),
    };
    (status, Json(body)).into_response()
}
