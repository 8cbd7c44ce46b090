//! Tool Registry - central registration and dispatch for all tools.
//!
//! This module provides:
//! - The model-facing tool list in OpenAI function-calling format
//! - Dispatch of model-issued tool calls to the matching definition
//!
//! Dispatch fails closed: argument JSON that does not satisfy a tool's
//! parameter schema produces a structured validation failure in the
//! result envelope, never a raw error.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::warn;

use super::definitions::{
    CreateTodoTool, DeleteMultipleTodosTool, DeleteTodoTool, GetTodoChecklistsTool, GetTodosTool,
    UpdateTodoChecklistItemTool, UpdateTodoTool,
};
use super::outcome::ToolOutcome;
use crate::domains::todos::service::TodoService;

/// Tool registry - manages all operations exposed to the model.
pub struct ToolRegistry {
    service: Arc<TodoService>,
}

impl ToolRegistry {
    /// Create a new tool registry over the todo service.
    pub fn new(service: Arc<TodoService>) -> Self {
        Self { service }
    }

    /// Get all tool names.
    pub fn tool_names() -> Vec<&'static str> {
        vec![
            CreateTodoTool::NAME,
            GetTodosTool::NAME,
            UpdateTodoTool::NAME,
            DeleteTodoTool::NAME,
            DeleteMultipleTodosTool::NAME,
            GetTodoChecklistsTool::NAME,
            UpdateTodoChecklistItemTool::NAME,
        ]
    }

    /// The full tool list in OpenAI function-calling format.
    ///
    /// This is the single source of truth for what the model may invoke;
    /// the chat orchestrator attaches it to every request.
    pub fn model_tools() -> Vec<serde_json::Value> {
        [
            (
                CreateTodoTool::NAME,
                CreateTodoTool::DESCRIPTION,
                CreateTodoTool::parameters(),
            ),
            (
                GetTodosTool::NAME,
                GetTodosTool::DESCRIPTION,
                GetTodosTool::parameters(),
            ),
            (
                UpdateTodoTool::NAME,
                UpdateTodoTool::DESCRIPTION,
                UpdateTodoTool::parameters(),
            ),
            (
                DeleteTodoTool::NAME,
                DeleteTodoTool::DESCRIPTION,
                DeleteTodoTool::parameters(),
            ),
            (
                DeleteMultipleTodosTool::NAME,
                DeleteMultipleTodosTool::DESCRIPTION,
                DeleteMultipleTodosTool::parameters(),
            ),
            (
                GetTodoChecklistsTool::NAME,
                GetTodoChecklistsTool::DESCRIPTION,
                GetTodoChecklistsTool::parameters(),
            ),
            (
                UpdateTodoChecklistItemTool::NAME,
                UpdateTodoChecklistItemTool::DESCRIPTION,
                UpdateTodoChecklistItemTool::parameters(),
            ),
        ]
        .into_iter()
        .map(|(name, description, parameters)| {
            json!({
                "type": "function",
                "function": {
                    "name": name,
                    "description": description,
                    "parameters": parameters,
                },
            })
        })
        .collect()
    }

    /// Dispatch a model-issued tool call.
    ///
    /// `arguments` is the raw argument JSON the model produced (possibly
    /// empty). Unknown tool names and schema mismatches both come back as
    /// failed envelopes.
    pub fn call(&self, name: &str, arguments: &str) -> ToolOutcome {
        match name {
            CreateTodoTool::NAME => match parse_args(name, arguments) {
                Ok(params) => CreateTodoTool::execute(&self.service, params),
                Err(outcome) => outcome,
            },
            GetTodosTool::NAME => match parse_args(name, arguments) {
                Ok(params) => GetTodosTool::execute(&self.service, params),
                Err(outcome) => outcome,
            },
            UpdateTodoTool::NAME => match parse_args(name, arguments) {
                Ok(params) => UpdateTodoTool::execute(&self.service, params),
                Err(outcome) => outcome,
            },
            DeleteTodoTool::NAME => match parse_args(name, arguments) {
                Ok(params) => DeleteTodoTool::execute(&self.service, params),
                Err(outcome) => outcome,
            },
            DeleteMultipleTodosTool::NAME => match parse_args(name, arguments) {
                Ok(params) => DeleteMultipleTodosTool::execute(&self.service, params),
                Err(outcome) => outcome,
            },
            GetTodoChecklistsTool::NAME => match parse_args(name, arguments) {
                Ok(params) => GetTodoChecklistsTool::execute(&self.service, params),
                Err(outcome) => outcome,
            },
            UpdateTodoChecklistItemTool::NAME => match parse_args(name, arguments) {
                Ok(params) => UpdateTodoChecklistItemTool::execute(&self.service, params),
                Err(outcome) => outcome,
            },
            _ => {
                warn!("Unknown tool requested: {}", name);
                ToolOutcome::failure(format!("Unknown tool: {name}"))
            }
        }
    }
}

/// Deserialize the model's argument JSON into a tool's typed parameters.
fn parse_args<T: DeserializeOwned>(tool: &str, raw: &str) -> Result<T, ToolOutcome> {
    let raw = if raw.trim().is_empty() { "{}" } else { raw };
    serde_json::from_str(raw).map_err(|e| {
        warn!("Rejecting malformed arguments for tool {tool}: {e}");
        ToolOutcome::failure(format!("Invalid arguments for {tool}: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::todos::store::TodoStore;

    fn registry() -> ToolRegistry {
        let store = Arc::new(TodoStore::open_in_memory().unwrap());
        ToolRegistry::new(Arc::new(TodoService::new(store)))
    }

    #[test]
    fn test_registry_tool_names() {
        let names = ToolRegistry::tool_names();
        assert_eq!(names.len(), 7);
        assert!(names.contains(&"createTodo"));
        assert!(names.contains(&"getTodos"));
        assert!(names.contains(&"updateTodo"));
        assert!(names.contains(&"deleteTodo"));
        assert!(names.contains(&"deleteMultipleTodos"));
        assert!(names.contains(&"getTodoChecklists"));
        assert!(names.contains(&"updateTodoChecklistItem"));
    }

    #[test]
    fn test_model_tools_are_openai_shaped() {
        let tools = ToolRegistry::model_tools();
        assert_eq!(tools.len(), 7);
        for tool in &tools {
            assert_eq!(tool["type"], "function");
            assert!(tool["function"]["name"].is_string());
            assert!(tool["function"]["parameters"].is_object());
        }
    }

    #[test]
    fn test_call_create_and_get_round_trip() {
        let registry = registry();
        let outcome = registry.call("createTodo", r#"{"title": "Buy milk"}"#);
        assert!(outcome.success);

        let outcome = registry.call("getTodos", "");
        assert!(outcome.success);
        assert_eq!(outcome.data["count"], 1);
        assert_eq!(outcome.data["todos"][0]["title"], "Buy milk");
    }

    #[test]
    fn test_call_unknown_tool_fails_closed() {
        let registry = registry();
        let outcome = registry.call("dropAllTables", "{}");
        assert!(!outcome.success);
        assert!(outcome.error.unwrap().contains("Unknown tool"));
    }

    #[test]
    fn test_call_schema_mismatch_fails_closed() {
        let registry = registry();
        // title must be a string
        let outcome = registry.call("createTodo", r#"{"title": 42}"#);
        assert!(!outcome.success);
        assert!(
            outcome
                .error
                .unwrap()
                .contains("Invalid arguments for createTodo")
        );

        // missing required id
        let outcome = registry.call("deleteTodo", "{}");
        assert!(!outcome.success);
    }

    #[test]
    fn test_call_bad_enum_value_fails_closed() {
        let registry = registry();
        let outcome = registry.call("getTodos", r#"{"priority": "urgent"}"#);
        assert!(!outcome.success);
    }
}
