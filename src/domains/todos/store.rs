//! SQLite-backed todo store.
//!
//! One row per todo; the checklist is embedded as a JSON column so each
//! todo behaves as a single document. Every mutation is a single statement
//! or a short transaction, which gives the cascade-on-delete and
//! per-document atomicity the data model requires without any cross-row
//! coordination.
//!
//! The connection is owned by the store behind a `Mutex` and injected at
//! construction; it is opened once at startup and dropped on shutdown.
//! The lock is never held across an await point.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

use super::error::StoreError;
use super::model::{ChecklistItem, Priority, Todo, TodoFilters};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS todos (
    id          TEXT PRIMARY KEY,
    title       TEXT NOT NULL,
    description TEXT,
    completed   INTEGER NOT NULL DEFAULT 0,
    priority    TEXT NOT NULL DEFAULT 'medium',
    checklist   TEXT NOT NULL DEFAULT '[]',
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos (created_at);
";

/// Busy timeout applied at connection establishment.
const BUSY_TIMEOUT_MS: u64 = 5_000;

/// Persistent collection of todos.
pub struct TodoStore {
    conn: Mutex<Connection>,
}

impl TodoStore {
    /// Open (or create) the store at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let conn = Connection::open(path.as_ref())?;
        info!("Opened todo store at {}", path.as_ref().display());
        Self::with_connection(conn)
    }

    /// Open an in-memory store. Used by tests and ephemeral deployments.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    fn with_connection(conn: Connection) -> Result<Self, StoreError> {
        conn.busy_timeout(std::time::Duration::from_millis(BUSY_TIMEOUT_MS))?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Insert a new todo.
    pub fn insert(&self, todo: &Todo) -> Result<(), StoreError> {
        let conn = self.lock();
        conn.execute(
            "INSERT INTO todos (id, title, description, completed, priority, checklist, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                todo.id,
                todo.title,
                todo.description,
                todo.completed,
                todo.priority.as_str(),
                encode_checklist(&todo.checklist)?,
                encode_time(todo.created_at),
                encode_time(todo.updated_at),
            ],
        )?;
        debug!(id = %todo.id, "Inserted todo");
        Ok(())
    }

    /// List todos matching the filters, newest first by creation time.
    pub fn list(&self, filters: TodoFilters) -> Result<Vec<Todo>, StoreError> {
        let mut sql = String::from(
            "SELECT id, title, description, completed, priority, checklist, created_at, updated_at
             FROM todos",
        );
        let mut clauses: Vec<String> = Vec::new();
        let mut args: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(completed) = filters.status.completed() {
            clauses.push(format!("completed = ?{}", args.len() + 1));
            args.push(Box::new(completed));
        }
        if let Some(priority) = filters.priority.priority() {
            clauses.push(format!("priority = ?{}", args.len() + 1));
            args.push(Box::new(priority.as_str().to_string()));
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let conn = self.lock();
        let mut stmt = conn.prepare(&sql)?;
        let params = rusqlite::params_from_iter(args.iter().map(|a| a.as_ref()));
        let rows = stmt.query_map(params, row_to_todo)?;

        let mut todos = Vec::new();
        for row in rows {
            todos.push(row??);
        }
        Ok(todos)
    }

    /// Fetch a single todo by id.
    pub fn get(&self, id: &str) -> Result<Option<Todo>, StoreError> {
        let conn = self.lock();
        let todo = conn
            .query_row(
                "SELECT id, title, description, completed, priority, checklist, created_at, updated_at
                 FROM todos WHERE id = ?1",
                params![id],
                row_to_todo,
            )
            .optional()?;
        todo.transpose()
    }

    /// Read-modify-write a todo inside a transaction.
    ///
    /// The closure receives the current record and may mutate it freely;
    /// `updated_at` is bumped and the row written back afterwards. Returns
    /// `None` when the todo does not exist, otherwise the updated record
    /// along with the closure's output.
    pub fn modify<F, T>(&self, id: &str, f: F) -> Result<Option<(Todo, T)>, StoreError>
    where
        F: FnOnce(&mut Todo) -> T,
    {
        let mut conn = self.lock();
        let tx = conn.transaction()?;

        let todo = tx
            .query_row(
                "SELECT id, title, description, completed, priority, checklist, created_at, updated_at
                 FROM todos WHERE id = ?1",
                params![id],
                row_to_todo,
            )
            .optional()?;

        let Some(todo) = todo else {
            return Ok(None);
        };
        let mut todo = todo?;

        let output = f(&mut todo);
        todo.updated_at = Utc::now();

        tx.execute(
            "UPDATE todos
             SET title = ?2, description = ?3, completed = ?4, priority = ?5,
                 checklist = ?6, updated_at = ?7
             WHERE id = ?1",
            params![
                todo.id,
                todo.title,
                todo.description,
                todo.completed,
                todo.priority.as_str(),
                encode_checklist(&todo.checklist)?,
                encode_time(todo.updated_at),
            ],
        )?;
        tx.commit()?;

        debug!(id = %todo.id, "Updated todo");
        Ok(Some((todo, output)))
    }

    /// Delete a todo. The embedded checklist goes with the row, so the
    /// cascade invariant holds by construction. Returns whether a row
    /// was removed.
    pub fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let conn = self.lock();
        let affected = conn.execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(affected > 0)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Connection> {
        // A poisoned lock means another thread panicked mid-statement;
        // the connection itself is still usable.
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

// ============================================================================
// Row codecs
// ============================================================================

fn encode_time(time: DateTime<Utc>) -> String {
    // Fixed-width UTC representation so lexicographic ORDER BY matches
    // chronological order.
    time.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn decode_time(raw: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("bad timestamp {raw:?}: {e}")))
}

fn encode_checklist(checklist: &[ChecklistItem]) -> Result<String, StoreError> {
    serde_json::to_string(checklist)
        .map_err(|e| StoreError::Corrupt(format!("unencodable checklist: {e}")))
}

fn decode_checklist(raw: &str) -> Result<Vec<ChecklistItem>, StoreError> {
    serde_json::from_str(raw).map_err(|e| StoreError::Corrupt(format!("bad checklist: {e}")))
}

fn row_to_todo(row: &rusqlite::Row<'_>) -> rusqlite::Result<Result<Todo, StoreError>> {
    let priority_raw: String = row.get(4)?;
    let checklist_raw: String = row.get(5)?;
    let created_raw: String = row.get(6)?;
    let updated_raw: String = row.get(7)?;

    let decoded = (|| {
        let priority = Priority::parse(&priority_raw)
            .ok_or_else(|| StoreError::Corrupt(format!("bad priority {priority_raw:?}")))?;
        Ok(Todo {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            completed: row.get(3)?,
            priority,
            checklist: decode_checklist(&checklist_raw)?,
            created_at: decode_time(&created_raw)?,
            updated_at: decode_time(&updated_raw)?,
        })
    })();

    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::todos::model::{PriorityFilter, StatusFilter};
    use uuid::Uuid;

    fn sample_todo(title: &str, priority: Priority, completed: bool) -> Todo {
        let now = Utc::now();
        Todo {
            id: Uuid::new_v4().to_string(),
            title: title.to_string(),
            description: None,
            completed,
            priority,
            checklist: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_insert_and_get_round_trip() {
        let store = TodoStore::open_in_memory().unwrap();
        let mut todo = sample_todo("Buy milk", Priority::Medium, false);
        todo.checklist.push(ChecklistItem::new("semi-skimmed", false));
        store.insert(&todo).unwrap();

        let fetched = store.get(&todo.id).unwrap().unwrap();
        assert_eq!(fetched.title, "Buy milk");
        assert_eq!(fetched.priority, Priority::Medium);
        assert_eq!(fetched.checklist.len(), 1);
        assert_eq!(fetched.checklist[0].text, "semi-skimmed");
    }

    #[test]
    fn test_get_unknown_id_is_none() {
        let store = TodoStore::open_in_memory().unwrap();
        assert!(store.get("missing").unwrap().is_none());
    }

    #[test]
    fn test_list_orders_newest_first() {
        let store = TodoStore::open_in_memory().unwrap();
        let mut older = sample_todo("older", Priority::Low, false);
        older.created_at = Utc::now() - chrono::Duration::seconds(60);
        let newer = sample_todo("newer", Priority::Low, false);
        store.insert(&older).unwrap();
        store.insert(&newer).unwrap();

        let todos = store.list(TodoFilters::default()).unwrap();
        assert_eq!(todos.len(), 2);
        assert_eq!(todos[0].title, "newer");
        assert_eq!(todos[1].title, "older");
    }

    #[test]
    fn test_list_filters_combine_with_and() {
        let store = TodoStore::open_in_memory().unwrap();
        store
            .insert(&sample_todo("done high", Priority::High, true))
            .unwrap();
        store
            .insert(&sample_todo("pending high", Priority::High, false))
            .unwrap();
        store
            .insert(&sample_todo("done low", Priority::Low, true))
            .unwrap();

        let todos = store
            .list(TodoFilters {
                status: StatusFilter::Completed,
                priority: PriorityFilter::High,
            })
            .unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].title, "done high");
    }

    #[test]
    fn test_modify_bumps_updated_at() {
        let store = TodoStore::open_in_memory().unwrap();
        let mut todo = sample_todo("rename me", Priority::Medium, false);
        todo.updated_at = Utc::now() - chrono::Duration::seconds(60);
        store.insert(&todo).unwrap();

        let (updated, ()) = store
            .modify(&todo.id, |t| t.title = "renamed".to_string())
            .unwrap()
            .unwrap();
        assert_eq!(updated.title, "renamed");
        assert!(updated.updated_at > todo.updated_at);

        let fetched = store.get(&todo.id).unwrap().unwrap();
        assert_eq!(fetched.title, "renamed");
    }

    #[test]
    fn test_modify_missing_todo_is_none() {
        let store = TodoStore::open_in_memory().unwrap();
        assert!(store.modify("missing", |_| ()).unwrap().is_none());
    }

    #[test]
    fn test_delete_cascades_checklist() {
        let store = TodoStore::open_in_memory().unwrap();
        let mut todo = sample_todo("with checklist", Priority::Medium, false);
        todo.checklist.push(ChecklistItem::new("sub-task", false));
        store.insert(&todo).unwrap();

        assert!(store.delete(&todo.id).unwrap());
        assert!(store.get(&todo.id).unwrap().is_none());
        // Deleting again reports no row removed.
        assert!(!store.delete(&todo.id).unwrap());
    }

    #[test]
    fn test_on_disk_store_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("todos.db");
        let todo = sample_todo("persisted", Priority::High, false);
        {
            let store = TodoStore::open(&path).unwrap();
            store.insert(&todo).unwrap();
        }
        let reopened = TodoStore::open(&path).unwrap();
        assert_eq!(reopened.get(&todo.id).unwrap().unwrap().title, "persisted");
    }
}
