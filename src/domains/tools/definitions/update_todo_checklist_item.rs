//! `updateTodoChecklistItem` tool definition.

use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::schema_value;
use crate::domains::todos::model::ChecklistItemUpdate;
use crate::domains::todos::service::TodoService;
use crate::domains::tools::outcome::ToolOutcome;

/// The checklist entry portion of an update request.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChecklistItemPatch {
    /// The ID of the checklist item to update.
    pub id: String,
    /// The new text for the checklist item.
    pub text: String,
    /// Whether the checklist item is completed.
    pub completed: bool,
}

/// Parameters for the `updateTodoChecklistItem` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct UpdateTodoChecklistItemParams {
    /// The ID of the todo to update the checklist for.
    pub id: String,
    /// The checklist item update to apply.
    pub checklist: ChecklistItemPatch,
}

/// Update one checklist item on behalf of the model.
pub struct UpdateTodoChecklistItemTool;

impl UpdateTodoChecklistItemTool {
    pub const NAME: &'static str = "updateTodoChecklistItem";

    pub const DESCRIPTION: &'static str = "Update the checklist items for a specific todo";

    pub fn parameters() -> serde_json::Value {
        schema_value::<UpdateTodoChecklistItemParams>()
    }

    pub fn execute(service: &TodoService, params: UpdateTodoChecklistItemParams) -> ToolOutcome {
        info!(todo_id = %params.id, item_id = %params.checklist.id, "Model updating checklist item");
        let update = ChecklistItemUpdate {
            id: params.checklist.id,
            text: Some(params.checklist.text),
            completed: Some(params.checklist.completed),
        };
        match service.update_checklist_item(&params.id, update) {
            Ok(todo) => ToolOutcome::success(json!({ "todo": todo })),
            Err(err) => ToolOutcome::failure(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::todos::model::CreateTodoData;
    use crate::domains::todos::store::TodoStore;
    use std::sync::Arc;

    #[test]
    fn test_execute_rewrites_item() {
        let service = TodoService::new(Arc::new(TodoStore::open_in_memory().unwrap()));
        let todo = service
            .create_todo(CreateTodoData {
                title: "Chores".to_string(),
                ..Default::default()
            })
            .unwrap();
        let (_, item) = service.add_checklist_item(&todo.id, "laundry").unwrap();

        let outcome = UpdateTodoChecklistItemTool::execute(
            &service,
            UpdateTodoChecklistItemParams {
                id: todo.id,
                checklist: ChecklistItemPatch {
                    id: item.id,
                    text: "laundry and ironing".to_string(),
                    completed: true,
                },
            },
        );
        assert!(outcome.success);
        let items = outcome.data["todo"]["checklist"].as_array().unwrap();
        assert_eq!(items[0]["text"], "laundry and ironing");
        assert_eq!(items[0]["completed"], true);
    }
}
