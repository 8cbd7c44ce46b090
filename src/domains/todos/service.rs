//! Todo service.
//!
//! Mediates all access to the store: validates and sanitizes every request
//! before touching storage, and converts storage failures into generic
//! errors after logging the original cause. Nothing below this layer is
//! visible to the HTTP routes or the tool registry.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, instrument};
use uuid::Uuid;

use super::error::{StoreError, TodoError};
use super::model::{
    ChecklistItem, ChecklistItemUpdate, CreateTodoData, Todo, TodoFilters, UpdateTodoData,
};
use super::store::TodoStore;
use super::validation;

/// Service wrapping the todo store with validation and error policy.
pub struct TodoService {
    store: Arc<TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<TodoStore>) -> Self {
        Self { store }
    }

    /// List todos matching the filters, newest first.
    pub fn get_all_todos(&self, filters: TodoFilters) -> Result<Vec<Todo>, TodoError> {
        self.store
            .list(filters)
            .map_err(|e| storage_failure("fetch todos", e))
    }

    /// Fetch one todo by id.
    pub fn get_todo_by_id(&self, id: &str) -> Result<Todo, TodoError> {
        require_id(id, "Todo ID")?;
        self.store
            .get(id)
            .map_err(|e| storage_failure("fetch todo", e))?
            .ok_or(TodoError::TodoNotFound)
    }

    /// Create a todo from a validated, sanitized payload.
    #[instrument(skip_all, fields(title = %data.title.trim()))]
    pub fn create_todo(&self, data: CreateTodoData) -> Result<Todo, TodoError> {
        validation::validate_create(&data)?;
        let data = validation::sanitize_create(data);

        let now = Utc::now();
        let checklist = data
            .checklist
            .unwrap_or_default()
            .into_iter()
            .map(|item| ChecklistItem::new(item.text, item.completed))
            .collect();

        let todo = Todo {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            description: data.description,
            completed: false,
            priority: data.priority.unwrap_or_default(),
            checklist,
            created_at: now,
            updated_at: now,
        };

        self.store
            .insert(&todo)
            .map_err(|e| storage_failure("create todo", e))?;
        info!(id = %todo.id, "Created todo");
        Ok(todo)
    }

    /// Apply a partial update to a todo.
    #[instrument(skip(self, patch))]
    pub fn update_todo(&self, id: &str, patch: UpdateTodoData) -> Result<Todo, TodoError> {
        require_id(id, "Todo ID")?;
        validation::validate_update(&patch)?;
        let patch = validation::sanitize_update(patch);

        let updated = self
            .store
            .modify(id, |todo| {
                if let Some(title) = patch.title {
                    todo.title = title;
                }
                if let Some(description) = patch.description {
                    todo.description = if description.is_empty() {
                        None
                    } else {
                        Some(description)
                    };
                }
                if let Some(completed) = patch.completed {
                    todo.completed = completed;
                }
                if let Some(priority) = patch.priority {
                    todo.priority = priority;
                }
            })
            .map_err(|e| storage_failure("update todo", e))?;

        match updated {
            Some((todo, ())) => Ok(todo),
            None => Err(TodoError::TodoNotFound),
        }
    }

    /// Delete a todo by id.
    #[instrument(skip(self))]
    pub fn delete_todo(&self, id: &str) -> Result<(), TodoError> {
        require_id(id, "Todo ID")?;
        let removed = self
            .store
            .delete(id)
            .map_err(|e| storage_failure("delete todo", e))?;
        if removed {
            info!(id, "Deleted todo");
            Ok(())
        } else {
            Err(TodoError::TodoNotFound)
        }
    }

    // ========================================================================
    // Checklist operations
    // ========================================================================

    /// Append a checklist item to a todo. Returns the updated todo and the
    /// new item.
    pub fn add_checklist_item(
        &self,
        todo_id: &str,
        text: &str,
    ) -> Result<(Todo, ChecklistItem), TodoError> {
        require_id(todo_id, "Todo ID")?;
        validation::validate_item_text(text)?;

        let item = ChecklistItem::new(text.trim(), false);
        let updated = self
            .store
            .modify(todo_id, |todo| {
                todo.checklist.push(item.clone());
            })
            .map_err(|e| storage_failure("add checklist item", e))?;

        match updated {
            Some((todo, ())) => Ok((todo, item)),
            None => Err(TodoError::TodoNotFound),
        }
    }

    /// Update a single checklist item on a todo.
    pub fn update_checklist_item(
        &self,
        todo_id: &str,
        update: ChecklistItemUpdate,
    ) -> Result<Todo, TodoError> {
        require_id(todo_id, "Todo ID")?;
        validation::validate_item_update(&update)?;

        let updated = self
            .store
            .modify(todo_id, |todo| {
                let Some(item) = todo.checklist.iter_mut().find(|i| i.id == update.id) else {
                    return false;
                };
                if let Some(text) = &update.text {
                    item.text = text.trim().to_string();
                }
                if let Some(completed) = update.completed {
                    item.completed = completed;
                }
                true
            })
            .map_err(|e| storage_failure("update checklist item", e))?;

        match updated {
            Some((todo, true)) => Ok(todo),
            Some((_, false)) => Err(TodoError::ItemNotFound),
            None => Err(TodoError::TodoNotFound),
        }
    }

    /// Remove a checklist item from a todo.
    pub fn remove_checklist_item(&self, todo_id: &str, item_id: &str) -> Result<Todo, TodoError> {
        require_id(todo_id, "Todo ID")?;
        require_id(item_id, "Item ID")?;

        let updated = self
            .store
            .modify(todo_id, |todo| {
                let before = todo.checklist.len();
                todo.checklist.retain(|i| i.id != item_id);
                todo.checklist.len() < before
            })
            .map_err(|e| storage_failure("remove checklist item", e))?;

        match updated {
            Some((todo, true)) => Ok(todo),
            Some((_, false)) => Err(TodoError::ItemNotFound),
            None => Err(TodoError::TodoNotFound),
        }
    }
}

fn require_id(id: &str, field_name: &str) -> Result<(), TodoError> {
    match validation::validate_id(id, field_name) {
        None => Ok(()),
        Some(err) => Err(TodoError::Validation(super::error::FieldErrors(vec![err]))),
    }
}

/// Log the underlying storage error and collapse it to a generic failure.
fn storage_failure(operation: &str, err: StoreError) -> TodoError {
    error!("Storage error while trying to {operation}: {err}");
    TodoError::storage(operation)
}
