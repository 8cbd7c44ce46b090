//! `deleteMultipleTodos` tool definition.

use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::schema_value;
use crate::domains::todos::service::TodoService;
use crate::domains::tools::outcome::ToolOutcome;

/// Parameters for the `deleteMultipleTodos` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct DeleteMultipleTodosParams {
    /// Array of todo IDs to delete (get these from getTodos first).
    pub ids: Vec<String>,
}

/// Bulk-delete todos on behalf of the model.
///
/// Deletions run sequentially and are not atomic: partial completion is
/// reported through the per-id details and the success/fail counts, never
/// rolled back.
pub struct DeleteMultipleTodosTool;

impl DeleteMultipleTodosTool {
    pub const NAME: &'static str = "deleteMultipleTodos";

    pub const DESCRIPTION: &'static str =
        "Delete multiple todos at once by their IDs. Use this for bulk deletion.";

    pub fn parameters() -> serde_json::Value {
        schema_value::<DeleteMultipleTodosParams>()
    }

    pub fn execute(service: &TodoService, params: DeleteMultipleTodosParams) -> ToolOutcome {
        info!(count = params.ids.len(), "Model bulk-deleting todos");

        let mut details = Vec::new();
        let mut deleted_todos = Vec::new();
        let mut success_count = 0usize;
        let mut fail_count = 0usize;

        for id in &params.ids {
            let todo = service.get_todo_by_id(id).ok();
            match service.delete_todo(id) {
                Ok(()) => {
                    success_count += 1;
                    details.push(json!({ "id": id, "success": true }));
                    if let Some(todo) = todo {
                        deleted_todos.push(todo);
                    }
                }
                Err(err) => {
                    fail_count += 1;
                    details.push(json!({
                        "id": id,
                        "success": false,
                        "error": err.to_string(),
                    }));
                }
            }
        }

        let message = format!(
            "Successfully deleted {} todo{}{}",
            success_count,
            if success_count == 1 { "" } else { "s" },
            if fail_count > 0 {
                format!(", {fail_count} failed")
            } else {
                String::new()
            },
        );
        info!(success_count, fail_count, "Bulk delete finished");

        ToolOutcome::with_status(
            fail_count == 0,
            json!({
                "message": message,
                "details": details,
                "deletedTodos": deleted_todos,
                "successCount": success_count,
                "failCount": fail_count,
                "action": "bulk_delete",
                "timestamp": Utc::now().to_rfc3339(),
            }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::todos::model::{CreateTodoData, TodoFilters};
    use crate::domains::todos::store::TodoStore;
    use std::sync::Arc;

    fn service_with(titles: &[&str]) -> (TodoService, Vec<String>) {
        let service = TodoService::new(Arc::new(TodoStore::open_in_memory().unwrap()));
        let ids = titles
            .iter()
            .map(|title| {
                service
                    .create_todo(CreateTodoData {
                        title: title.to_string(),
                        ..Default::default()
                    })
                    .unwrap()
                    .id
            })
            .collect();
        (service, ids)
    }

    #[test]
    fn test_partial_failure_reports_counts() {
        let (service, ids) = service_with(&["Buy groceries"]);
        let outcome = DeleteMultipleTodosTool::execute(
            &service,
            DeleteMultipleTodosParams {
                ids: vec![ids[0].clone(), "no-such-id".to_string()],
            },
        );

        assert!(!outcome.success);
        assert_eq!(outcome.data["successCount"], 1);
        assert_eq!(outcome.data["failCount"], 1);
        assert_eq!(outcome.data["message"], "Successfully deleted 1 todo, 1 failed");
        assert_eq!(outcome.data["deletedTodos"][0]["title"], "Buy groceries");

        // The existing record is actually gone.
        assert!(service.get_all_todos(TodoFilters::default()).unwrap().is_empty());
    }

    #[test]
    fn test_full_success_pluralizes_message() {
        let (service, ids) = service_with(&["one", "two"]);
        let outcome =
            DeleteMultipleTodosTool::execute(&service, DeleteMultipleTodosParams { ids });
        assert!(outcome.success);
        assert_eq!(outcome.data["message"], "Successfully deleted 2 todos");
        assert_eq!(outcome.data["action"], "bulk_delete");
    }

    #[test]
    fn test_empty_id_list_is_trivially_successful() {
        let (service, _) = service_with(&[]);
        let outcome = DeleteMultipleTodosTool::execute(
            &service,
            DeleteMultipleTodosParams { ids: vec![] },
        );
        assert!(outcome.success);
        assert_eq!(outcome.data["successCount"], 0);
    }
}
