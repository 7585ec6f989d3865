//! Database migration runner.
//!
//! Embeds the SQL migration files at compile time and executes them on
//! database open. All statements use `IF NOT EXISTS` for idempotent re-running.

use crate::StrideDb;
use crate::error::DatabaseError;

/// Assignments and tasks: 2 tables, 3 indexes.
const MIGRATION_001: &str = include_str!("../migrations/001_initial.sql");
/// Group projects and their tasks: 2 tables, 3 indexes.
const MIGRATION_002: &str = include_str!("../migrations/002_group_projects.sql");

impl StrideDb {
    /// Run all embedded migrations in sequence.
    pub(crate) async fn run_migrations(&self) -> Result<(), DatabaseError> {
        let conn = self.conn().await;
        conn.execute_batch(MIGRATION_001)
            .await
            .map_err(|e| DatabaseError::Migration(format!("001_initial: {e}")))?;
        conn.execute_batch(MIGRATION_002)
            .await
            .map_err(|e| DatabaseError::Migration(format!("002_group_projects: {e}")))?;
        Ok(())
    }
}
