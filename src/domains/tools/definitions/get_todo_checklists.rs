//! `getTodoChecklists` tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;

use super::schema_value;
use crate::domains::todos::service::TodoService;
use crate::domains::tools::outcome::ToolOutcome;

/// Parameters for the `getTodoChecklists` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetTodoChecklistsParams {
    /// The ID of the todo to get the checklist for.
    pub id: String,
}

/// Read the checklist of one todo for the model.
pub struct GetTodoChecklistsTool;

impl GetTodoChecklistsTool {
    pub const NAME: &'static str = "getTodoChecklists";

    pub const DESCRIPTION: &'static str = "Get the checklist items for a specific todo";

    pub fn parameters() -> serde_json::Value {
        schema_value::<GetTodoChecklistsParams>()
    }

    pub fn execute(service: &TodoService, params: GetTodoChecklistsParams) -> ToolOutcome {
        match service.get_todo_by_id(&params.id) {
            Ok(todo) => ToolOutcome::success(json!({ "checklist": todo.checklist })),
            Err(err) => ToolOutcome::failure(err.to_string()),
        }
    }
}
