//! Todos domain module.
//!
//! Owns the persistent todo collection and everything that touches it:
//!
//! - `model.rs` - record types, request payloads, and the typed filter model
//! - `store.rs` - SQLite persistence (one row per todo, checklist embedded)
//! - `validation.rs` - boundary validation and sanitization
//! - `service.rs` - the controller all other components go through
//! - `routes.rs` - REST surface
//! - `error.rs` - domain error types

pub mod error;
pub mod model;
pub mod routes;
pub mod service;
pub mod store;
pub mod validation;

pub use error::{FieldError, FieldErrors, StoreError, TodoError};
pub use model::{
    ChecklistItem, ChecklistItemUpdate, CreateTodoData, NewChecklistItem, Priority,
    PriorityFilter, StatusFilter, Todo, TodoFilters, UpdateTodoData,
};
pub use service::TodoService;
pub use store::TodoStore;
