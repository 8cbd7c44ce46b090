//! `updateTodo` tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::schema_value;
use crate::domains::todos::model::{Priority, UpdateTodoData};
use crate::domains::todos::service::TodoService;
use crate::domains::tools::outcome::ToolOutcome;

/// Parameters for the `updateTodo` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTodoParams {
    /// The ID of the todo to update.
    pub id: String,
    /// New title for the todo.
    #[serde(default)]
    pub title: Option<String>,
    /// New description for the todo.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the todo is completed.
    #[serde(default)]
    pub completed: Option<bool>,
    /// New priority level.
    #[serde(default)]
    pub priority: Option<Priority>,
}

/// Update a todo on behalf of the model.
pub struct UpdateTodoTool;

impl UpdateTodoTool {
    pub const NAME: &'static str = "updateTodo";

    pub const DESCRIPTION: &'static str = "Update a todo item";

    pub fn parameters() -> serde_json::Value {
        schema_value::<UpdateTodoParams>()
    }

    pub fn execute(service: &TodoService, params: UpdateTodoParams) -> ToolOutcome {
        info!(id = %params.id, "Model updating todo");
        let patch = UpdateTodoData {
            title: params.title,
            description: params.description,
            completed: params.completed,
            priority: params.priority,
        };
        match service.update_todo(&params.id, patch) {
            Ok(todo) => ToolOutcome::success(json!({ "todo": todo })),
            Err(err) => ToolOutcome::failure(err.to_string()),
        }
    }
}
