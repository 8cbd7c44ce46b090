//! `deleteTodo` tool definition.

use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::schema_value;
use crate::domains::todos::service::TodoService;
use crate::domains::tools::outcome::ToolOutcome;

/// Parameters for the `deleteTodo` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteTodoParams {
    /// The exact ID of the todo to delete (get this from getTodos first).
    pub id: String,
}

/// Delete a single todo on behalf of the model.
///
/// The todo is looked up before deletion so the result can echo back what
/// was removed; the model uses that to phrase its confirmation.
pub struct DeleteTodoTool;

impl DeleteTodoTool {
    pub const NAME: &'static str = "deleteTodo";

    pub const DESCRIPTION: &'static str = "Delete a specific todo item by its ID. You must \
        first use getTodos to find the todo ID before deleting.";

    pub fn parameters() -> serde_json::Value {
        schema_value::<DeleteTodoParams>()
    }

    pub fn execute(service: &TodoService, params: DeleteTodoParams) -> ToolOutcome {
        info!(id = %params.id, "Model deleting todo");

        let deleted_todo = service.get_todo_by_id(&params.id).ok();
        match service.delete_todo(&params.id) {
            Ok(()) => ToolOutcome::success(json!({
                "message": "Todo deleted successfully",
                "deletedTodo": deleted_todo,
                "action": "delete",
                "timestamp": Utc::now().to_rfc3339(),
            })),
            Err(err) => ToolOutcome::failure(err.to_string()),
        }
    }
}
