//! Todo data model.
//!
//! Defines the persistent record types (`Todo`, `ChecklistItem`), the
//! request payloads accepted at the service boundary, and the typed
//! filter model used for listing.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Priority
// ============================================================================

/// Priority level of a todo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Storage representation of this priority.
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse a priority from its storage/wire representation.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Filters
// ============================================================================

/// Three-state completion filter for listing todos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(StatusFilter::All),
            "completed" => Some(StatusFilter::Completed),
            "pending" => Some(StatusFilter::Pending),
            _ => None,
        }
    }

    /// The completion value this filter matches, if it restricts at all.
    pub fn completed(&self) -> Option<bool> {
        match self {
            StatusFilter::All => None,
            StatusFilter::Completed => Some(true),
            StatusFilter::Pending => Some(false),
        }
    }
}

/// Four-state priority filter for listing todos.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PriorityFilter {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl PriorityFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "all" => Some(PriorityFilter::All),
            "low" => Some(PriorityFilter::Low),
            "medium" => Some(PriorityFilter::Medium),
            "high" => Some(PriorityFilter::High),
            _ => None,
        }
    }

    /// The priority this filter matches, if it restricts at all.
    pub fn priority(&self) -> Option<Priority> {
        match self {
            PriorityFilter::All => None,
            PriorityFilter::Low => Some(Priority::Low),
            PriorityFilter::Medium => Some(Priority::Medium),
            PriorityFilter::High => Some(Priority::High),
        }
    }
}

/// Combined listing filters. Both dimensions are ANDed together.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilters {
    pub status: StatusFilter,
    pub priority: PriorityFilter,
}

// ============================================================================
// Records
// ============================================================================

/// A sub-task belonging to exactly one todo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl ChecklistItem {
    /// Create a new checklist item with a fresh id.
    pub fn new(text: impl Into<String>, completed: bool) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            completed,
            created_at: Utc::now(),
        }
    }
}

/// A task record with title, optional description, completion flag,
/// priority, and an ordered checklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub checklist: Vec<ChecklistItem>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Request payloads
// ============================================================================

/// A checklist entry submitted as part of todo creation; it has no
/// identity until the service assigns one.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct NewChecklistItem {
    /// Checklist item text.
    pub text: String,
    /// Whether the item is already completed.
    #[serde(default)]
    pub completed: bool,
}

/// Payload for creating a todo.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CreateTodoData {
    /// The title of the todo.
    pub title: String,
    /// Optional description of the todo.
    #[serde(default)]
    pub description: Option<String>,
    /// Priority level of the todo. Defaults to medium.
    #[serde(default)]
    pub priority: Option<Priority>,
    /// Optional checklist items for the todo.
    #[serde(default)]
    pub checklist: Option<Vec<NewChecklistItem>>,
}

/// Partial update for a todo. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct UpdateTodoData {
    /// New title for the todo.
    #[serde(default)]
    pub title: Option<String>,
    /// New description for the todo.
    #[serde(default)]
    pub description: Option<String>,
    /// Whether the todo is completed.
    #[serde(default)]
    pub completed: Option<bool>,
    /// New priority level.
    #[serde(default)]
    pub priority: Option<Priority>,
}

impl UpdateTodoData {
    /// True when the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.completed.is_none()
            && self.priority.is_none()
    }
}

/// Partial update for a single checklist item.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ChecklistItemUpdate {
    /// The id of the checklist item to update.
    pub id: String,
    /// New text for the checklist item.
    #[serde(default)]
    pub text: Option<String>,
    /// Whether the checklist item is completed.
    #[serde(default)]
    pub completed: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_default_is_medium() {
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_priority_round_trips_through_storage_repr() {
        for p in [Priority::Low, Priority::Medium, Priority::High] {
            assert_eq!(Priority::parse(p.as_str()), Some(p));
        }
        assert_eq!(Priority::parse("urgent"), None);
    }

    #[test]
    fn test_priority_serde_uses_lowercase() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"high\"");
        let p: Priority = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(p, Priority::Low);
    }

    #[test]
    fn test_status_filter_completed_mapping() {
        assert_eq!(StatusFilter::All.completed(), None);
        assert_eq!(StatusFilter::Completed.completed(), Some(true));
        assert_eq!(StatusFilter::Pending.completed(), Some(false));
    }

    #[test]
    fn test_priority_filter_parse_rejects_unknown() {
        assert_eq!(PriorityFilter::parse("high"), Some(PriorityFilter::High));
        assert_eq!(PriorityFilter::parse("critical"), None);
    }

    #[test]
    fn test_todo_serializes_camel_case() {
        let todo = Todo {
            id: "t1".to_string(),
            title: "Buy milk".to_string(),
            description: None,
            completed: false,
            priority: Priority::Medium,
            checklist: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let value = serde_json::to_value(&todo).unwrap();
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        // Absent description is omitted entirely.
        assert!(value.get("description").is_none());
    }

    #[test]
    fn test_checklist_items_get_unique_ids() {
        let a = ChecklistItem::new("one", false);
        let b = ChecklistItem::new("one", false);
        assert_ne!(a.id, b.id);
    }
}
