//! SQLite-backed task store.
//!
//! Exactly four operations are exposed: list all, create, case-insensitive
//! substring search, and delete by id. This is the only sanctioned access
//! path to the task table.

use std::path::Path;

use chrono::Utc;
use rusqlite::{params, Connection, Row};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

/// A single to-do item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub todo: String,
    pub created_at: String,
    pub updated_at: String,
}

fn parse_task_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get("id")?,
        todo: row.get("todo")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

/// Handle to the task database.
pub struct TaskStore {
    conn: Connection,
}

impl TaskStore {
    /// Open (or create) the task database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open a throwaway in-memory store (useful for testing).
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, StoreError> {
        // AUTOINCREMENT keeps ids monotonic: a deleted id is never reused.
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS todos (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                todo TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(Self { conn })
    }

    /// Return every task in insertion order.
    pub fn list_all(&self) -> Result<Vec<Task>, StoreError> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, todo, created_at, updated_at FROM todos ORDER BY id")?;
        let tasks = stmt
            .query_map([], parse_task_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Insert a new task and return its assigned id.
    ///
    /// The text is stored as given; callers are responsible for passing a
    /// non-empty description.
    pub fn create(&self, text: &str) -> Result<i64, StoreError> {
        let now = Utc::now().to_rfc3339();
        self.conn.execute(
            "INSERT INTO todos (todo, created_at, updated_at) VALUES (?1, ?2, ?2)",
            params![text, now],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Return all tasks whose text contains `query` as a case-insensitive
    /// substring. An empty query matches every task.
    pub fn search(&self, query: &str) -> Result<Vec<Task>, StoreError> {
        let pattern = format!("%{}%", escape_like(query));
        let mut stmt = self.conn.prepare(
            "SELECT id, todo, created_at, updated_at FROM todos
             WHERE LOWER(todo) LIKE LOWER(?1) ESCAPE '\\' ORDER BY id",
        )?;
        let tasks = stmt
            .query_map(params![pattern], parse_task_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Delete the task with the given id and return a confirmation message.
    ///
    /// Deleting an id that does not exist is a no-op; the confirmation is
    /// returned either way.
    pub fn delete_by_id(&self, id: i64) -> Result<String, StoreError> {
        self.conn
            .execute("DELETE FROM todos WHERE id = ?1", params![id])?;
        Ok(format!("Deleted todo with id {}", id))
    }
}

/// Escape LIKE metacharacters so the query is matched literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
