//! Boundary validation and sanitization for todo requests.
//!
//! All checks run before any storage access. Free-text fields are trimmed;
//! a whitespace-only optional field collapses to `None`.

use super::error::{FieldError, FieldErrors, TodoError};
use super::model::{ChecklistItemUpdate, CreateTodoData, NewChecklistItem, UpdateTodoData};

/// Maximum length of a todo title.
pub const TITLE_MAX_LEN: usize = 200;

/// Maximum length of a todo description.
pub const DESCRIPTION_MAX_LEN: usize = 1000;

/// Maximum length of a checklist item text.
pub const CHECKLIST_TEXT_MAX_LEN: usize = 200;

// ============================================================================
// Field validators
// ============================================================================

/// Validate that an id is present and non-blank.
pub fn validate_id(id: &str, field_name: &str) -> Option<FieldError> {
    if id.trim().is_empty() {
        return Some(FieldError::new(
            field_name.to_lowercase().replace(' ', "_"),
            format!("{field_name} is required"),
        ));
    }
    None
}

fn validate_title(title: &str) -> Option<FieldError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Some(FieldError::new("title", "Title is required"));
    }
    if trimmed.chars().count() > TITLE_MAX_LEN {
        return Some(FieldError::new(
            "title",
            format!("Title must be less than {TITLE_MAX_LEN} characters"),
        ));
    }
    None
}

fn validate_description(description: &str) -> Option<FieldError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Some(FieldError::new(
            "description",
            format!("Description must be less than {DESCRIPTION_MAX_LEN} characters"),
        ));
    }
    None
}

fn validate_checklist_text(text: &str, field: &str) -> Option<FieldError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(FieldError::new(field, "Checklist item text is required"));
    }
    if trimmed.chars().count() > CHECKLIST_TEXT_MAX_LEN {
        return Some(FieldError::new(
            field,
            format!("Checklist item text must be less than {CHECKLIST_TEXT_MAX_LEN} characters"),
        ));
    }
    None
}

// ============================================================================
// Request validation
// ============================================================================

/// Validate a create request. Collects every failing field.
pub fn validate_create(data: &CreateTodoData) -> Result<(), TodoError> {
    let mut errors = Vec::new();

    if let Some(err) = validate_title(&data.title) {
        errors.push(err);
    }
    if let Some(description) = &data.description
        && let Some(err) = validate_description(description)
    {
        errors.push(err);
    }
    if let Some(checklist) = &data.checklist {
        for (index, item) in checklist.iter().enumerate() {
            if let Some(err) = validate_checklist_text(&item.text, &format!("checklist[{index}]")) {
                errors.push(err);
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TodoError::Validation(FieldErrors(errors)))
    }
}

/// Validate an update request. Only provided fields are checked.
pub fn validate_update(data: &UpdateTodoData) -> Result<(), TodoError> {
    let mut errors = Vec::new();

    if let Some(title) = &data.title
        && let Some(err) = validate_title(title)
    {
        errors.push(err);
    }
    if let Some(description) = &data.description
        && let Some(err) = validate_description(description)
    {
        errors.push(err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TodoError::Validation(FieldErrors(errors)))
    }
}

/// Validate a checklist item update.
pub fn validate_item_update(update: &ChecklistItemUpdate) -> Result<(), TodoError> {
    let mut errors = Vec::new();

    if let Some(err) = validate_id(&update.id, "Item ID") {
        errors.push(err);
    }
    if let Some(text) = &update.text
        && let Some(err) = validate_checklist_text(text, "checklist")
    {
        errors.push(err);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(TodoError::Validation(FieldErrors(errors)))
    }
}

/// Validate the text of a standalone checklist item addition.
pub fn validate_item_text(text: &str) -> Result<(), TodoError> {
    match validate_checklist_text(text, "text") {
        None => Ok(()),
        Some(err) => Err(TodoError::Validation(FieldErrors(vec![err]))),
    }
}

// ============================================================================
// Sanitization
// ============================================================================

/// Trim an optional free-text field, collapsing blank values to `None`.
pub fn sanitize_optional(value: Option<String>) -> Option<String> {
    value.and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// Trim all free-text fields of a create request and apply defaults.
pub fn sanitize_create(data: CreateTodoData) -> CreateTodoData {
    CreateTodoData {
        title: data.title.trim().to_string(),
        description: sanitize_optional(data.description),
        priority: Some(data.priority.unwrap_or_default()),
        checklist: data.checklist.map(|items| {
            items
                .into_iter()
                .map(|item| NewChecklistItem {
                    text: item.text.trim().to_string(),
                    completed: item.completed,
                })
                .collect()
        }),
    }
}

/// Trim all free-text fields of an update request.
pub fn sanitize_update(data: UpdateTodoData) -> UpdateTodoData {
    UpdateTodoData {
        title: data.title.map(|t| t.trim().to_string()),
        description: data.description.map(|d| d.trim().to_string()),
        completed: data.completed,
        priority: data.priority,
    }
}
