//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.
//!
//! Each tool declares its name, description, a typed parameter struct
//! deriving `Deserialize + JsonSchema`, and an `execute()` over the todo
//! service. The registry wires them into the model-facing tool list.

mod create_todo;
mod delete_multiple_todos;
mod delete_todo;
mod get_todo_checklists;
mod get_todos;
mod update_todo;
mod update_todo_checklist_item;

pub use create_todo::{CreateTodoParams, CreateTodoTool};
pub use delete_multiple_todos::{DeleteMultipleTodosParams, DeleteMultipleTodosTool};
pub use delete_todo::{DeleteTodoParams, DeleteTodoTool};
pub use get_todo_checklists::{GetTodoChecklistsParams, GetTodoChecklistsTool};
pub use get_todos::{GetTodosParams, GetTodosTool};
pub use update_todo::{UpdateTodoParams, UpdateTodoTool};
pub use update_todo_checklist_item::{
    ChecklistItemPatch, UpdateTodoChecklistItemParams, UpdateTodoChecklistItemTool,
};

/// Render a parameter struct's JSON Schema for the model-facing tool list.
pub(crate) fn schema_value<T: schemars::JsonSchema>() -> serde_json::Value {
    schemars::schema_for!(T).to_value()
}
