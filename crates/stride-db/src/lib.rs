//! # stride-db
//!
//! libSQL persistence for Stride.
//!
//! Stores assignments with their milestone tasks, and group projects with
//! their tasks and branch history. Works against a local file, `:memory:`
//! for tests, or a hosted Turso database. [`service::StrideService`]
//! implements the planner's `AssignmentStore`.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
mod store;

mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

/// Database handle for all Stride state.
///
/// Every statement runs on one connection, handed out by [`Self::conn`] one
/// caller at a time. A transaction keeps the guard until it commits or rolls
/// back, so statements from other callers never run inside it.
pub struct StrideDb {
    _db: libsql::Database,
    conn: Mutex<libsql::Connection>,
    remote: bool,
}

impl StrideDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        Self::connect(db, false).await
    }

    /// Open a hosted database over the network (`libsql://` or `https://`).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be reached or
    /// migrations fail.
    pub async fn open_remote(url: &str, auth_token: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_remote(url.to_string(), auth_token.to_string())
            .build()
            .await?;
        Self::connect(db, true).await
    }

    async fn connect(db: libsql::Database, remote: bool) -> Result<Self, DatabaseError> {
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        let stride_db = Self {
            _db: db,
            conn: Mutex::new(conn),
            remote,
        };
        stride_db.run_migrations().await?;
        Ok(stride_db)
    }

    /// Wait for exclusive use of the connection.
    pub async fn conn(&self) -> MutexGuard<'_, libsql::Connection> {
        self.conn.lock().await
    }

    /// Whether this handle talks to a hosted database.
    #[must_use]
    pub const fn is_remote(&self) -> bool {
        self.remote
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> StrideDb {
        StrideDb::open_local(":memory:").await.unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;
        assert!(!db.is_remote());

        let tables = ["assignments", "tasks", "group_projects", "group_tasks"];
        for table in &tables {
            let mut rows = db
                .conn()
                .await
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [*table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn assignments_table_has_no_total_column() {
        let db = test_db().await;
        let mut rows = db
            .conn()
            .await
            .query("SELECT name FROM pragma_table_info('assignments')", ())
            .await
            .unwrap();
        let mut columns = Vec::new();
        while let Some(row) = rows.next().await.unwrap() {
            columns.push(row.get::<String>(0).unwrap());
        }
        assert!(columns.contains(&"ai_summary".to_string()));
        assert!(!columns.iter().any(|c| c.contains("total")));
    }

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn foreign_keys_are_enforced() {
        let db = test_db().await;
        let result = db
            .conn()
            .await
            .execute(
                "INSERT INTO tasks (id, assignment_id, user_id, position, text) \
                 VALUES ('tsk-00000001', 'asg-missing', 'user-1', 0, 'Outline')",
                (),
            )
            .await;
        assert!(result.is_err());
    }
}
