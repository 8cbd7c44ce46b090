//! `getTodos` tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::schema_value;
use crate::domains::todos::model::{PriorityFilter, StatusFilter, TodoFilters};
use crate::domains::todos::service::TodoService;
use crate::domains::tools::outcome::ToolOutcome;

/// Parameters for the `getTodos` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct GetTodosParams {
    /// Filter todos by completion status.
    #[serde(default)]
    pub filter: StatusFilter,
    /// Filter todos by priority.
    #[serde(default)]
    pub priority: PriorityFilter,
}

/// List todos for the model, with optional filtering.
pub struct GetTodosTool;

impl GetTodosTool {
    pub const NAME: &'static str = "getTodos";

    pub const DESCRIPTION: &'static str = "Get all todos with optional filtering. Use this \
        first when you need to delete todos to get their IDs.";

    pub fn parameters() -> serde_json::Value {
        schema_value::<GetTodosParams>()
    }

    pub fn execute(service: &TodoService, params: GetTodosParams) -> ToolOutcome {
        info!(?params.filter, ?params.priority, "Model fetching todos");
        let filters = TodoFilters {
            status: params.filter,
            priority: params.priority,
        };
        match service.get_all_todos(filters) {
            Ok(todos) => {
                let count = todos.len();
                ToolOutcome::success(json!({ "todos": todos, "count": count }))
            }
            Err(err) => ToolOutcome::failure(err.to_string()),
        }
    }
}
