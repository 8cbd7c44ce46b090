//! Todo domain error types.

use thiserror::Error;

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A non-empty list of field-level validation failures.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FieldErrors(pub Vec<FieldError>);

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join(", ");
        f.write_str(&joined)
    }
}

/// Errors reported by the todo service.
///
/// Storage failures are logged at the point of capture and surfaced here
/// only as a generic message; the underlying error never crosses the
/// service boundary.
#[derive(Debug, Error)]
pub enum TodoError {
    /// One or more request fields failed validation.
    #[error("{0}")]
    Validation(FieldErrors),

    /// The referenced todo does not exist.
    #[error("Todo not found")]
    TodoNotFound,

    /// The referenced checklist item does not exist on the todo.
    #[error("Checklist item not found")]
    ItemNotFound,

    /// The storage layer failed; the message is a generic operation label.
    #[error("{0}")]
    Storage(String),
}

impl TodoError {
    /// Validation error for a single field.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(FieldErrors(vec![FieldError::new(field, message)]))
    }

    /// Generic storage failure with an operation label, e.g. "Failed to
    /// create todo".
    pub fn storage(operation: &str) -> Self {
        Self::Storage(format!("Failed to {operation}"))
    }
}

/// Errors surfaced by the SQLite store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A persisted checklist or timestamp column failed to decode.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_errors_join_with_commas() {
        let errors = FieldErrors(vec![
            FieldError::new("title", "Title is required"),
            FieldError::new("priority", "Priority must be low, medium, or high"),
        ]);
        assert_eq!(
            errors.to_string(),
            "title: Title is required, priority: Priority must be low, medium, or high"
        );
    }

    #[test]
    fn test_storage_error_is_generic() {
        let err = TodoError::storage("fetch todos");
        assert_eq!(err.to_string(), "Failed to fetch todos");
    }
}
