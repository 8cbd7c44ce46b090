//! `createTodo` tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::schema_value;
use crate::domains::todos::model::{CreateTodoData, NewChecklistItem, Priority};
use crate::domains::todos::service::TodoService;
use crate::domains::tools::outcome::ToolOutcome;

/// Parameters for the `createTodo` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTodoParams {
    /// The title of the todo.
    pub title: String,
    /// Optional description of the todo.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority level of the todo.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Optional checklist items for the todo.
    #[serde(default)]
    pub checklist: Option<Vec<NewChecklistItem>>,
}

/// Create a new todo on behalf of the model.
pub struct CreateTodoTool;

impl CreateTodoTool {
    pub const NAME: &'static str = "createTodo";

    pub const DESCRIPTION: &'static str = "Create a new todo item with optional checklist";

    pub fn parameters() -> serde_json::Value {
        schema_value::<CreateTodoParams>()
    }

    pub fn execute(service: &TodoService, params: CreateTodoParams) -> ToolOutcome {
        info!(title = %params.title, "Model creating todo");
        let data = CreateTodoData {
            title: params.title,
            description: params.description,
            priority: params.priority,
            checklist: params.checklist,
        };
        match service.create_todo(data) {
            Ok(todo) => ToolOutcome::success(json!({ "todo": todo })),
            Err(err) => ToolOutcome::failure(err.to_string()),
        }
    }
}
