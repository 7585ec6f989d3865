//! Task repository: milestone rows owned by an assignment.
//!
//! `position` keeps tasks in the order they were generated or added.

use chrono::Utc;

use stride_core::entities::{Assignment, Task};

use crate::error::DatabaseError;
use crate::helpers::get_bool;
use crate::service::StrideService;

const SELECT_COLS: &str = "id, text, completed, eta";

fn row_to_task(row: &libsql::Row) -> Result<Task, DatabaseError> {
    Ok(Task {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: get_bool(row, 2)?,
        eta: row.get(3)?,
    })
}

/// Insert `tasks` at positions `start..`. Runs on a plain connection or
/// inside a transaction.
pub(crate) async fn insert_task_rows(
    conn: &libsql::Connection,
    user_id: &str,
    assignment_id: &str,
    tasks: &[Task],
    start: i64,
) -> Result<(), DatabaseError> {
    let now = Utc::now().to_rfc3339();
    for (position, task) in (start..).zip(tasks) {
        conn.execute(
            "INSERT INTO tasks (id, assignment_id, user_id, position, text, completed, eta, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            libsql::params![
                task.id.as_str(),
                assignment_id,
                user_id,
                position,
                task.text.as_str(),
                i64::from(task.completed),
                task.eta,
                now.as_str()
            ],
        )
        .await?;
    }
    Ok(())
}

async fn next_position(conn: &libsql::Connection, assignment_id: &str) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT COALESCE(MAX(position) + 1, 0) FROM tasks WHERE assignment_id = ?1",
            [assignment_id],
        )
        .await?;
    let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
    Ok(row.get::<i64>(0)?)
}

/// Body of [`StrideService::commit_plan`], run inside its transaction.
async fn write_plan(
    conn: &libsql::Connection,
    user_id: &str,
    planned: &Assignment,
    replace: bool,
) -> Result<(), DatabaseError> {
    if replace {
        conn.execute("DELETE FROM tasks WHERE assignment_id = ?1", [planned.id.as_str()])
            .await?;
    } else if next_position(conn, &planned.id).await? > 0 {
        return Err(DatabaseError::Conflict(planned.id.clone()));
    }

    insert_task_rows(conn, user_id, &planned.id, &planned.tasks, 0).await?;

    let changed = conn
        .execute(
            "UPDATE assignments
             SET ai_summary = ?1, planned_description = ?2, updated_at = ?3
             WHERE id = ?4",
            libsql::params![
                planned.ai_summary.as_deref(),
                planned.planned_description.as_deref(),
                Utc::now().to_rfc3339(),
                planned.id.as_str()
            ],
        )
        .await?;
    if changed == 0 {
        return Err(DatabaseError::NoResult);
    }
    Ok(())
}

/// Tasks of one assignment in stored order.
pub(crate) async fn query_tasks(
    conn: &libsql::Connection,
    assignment_id: &str,
) -> Result<Vec<Task>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM tasks WHERE assignment_id = ?1 ORDER BY position, id"),
            [assignment_id],
        )
        .await?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next().await? {
        tasks.push(row_to_task(&row)?);
    }
    Ok(tasks)
}

impl StrideService {
    pub async fn list_tasks(&self, assignment_id: &str) -> Result<Vec<Task>, DatabaseError> {
        let conn = self.db().conn().await;
        query_tasks(&conn, assignment_id).await
    }

    /// Append one task after the existing ones.
    pub async fn insert_task(
        &self,
        user_id: &str,
        assignment_id: &str,
        task: &Task,
    ) -> Result<(), DatabaseError> {
        self.insert_tasks(user_id, assignment_id, std::slice::from_ref(task))
            .await
    }

    /// Append several tasks after the existing ones, all or nothing.
    pub async fn insert_tasks(
        &self,
        user_id: &str,
        assignment_id: &str,
        tasks: &[Task],
    ) -> Result<(), DatabaseError> {
        let conn = self.db().conn().await;
        let tx = conn.transaction().await?;
        let start = next_position(&tx, assignment_id).await?;
        insert_task_rows(&tx, user_id, assignment_id, tasks, start).await?;
        tx.commit().await?;
        tracing::debug!(assignment_id, count = tasks.len(), "tasks inserted");
        Ok(())
    }

    pub async fn update_task_text(
        &self,
        assignment_id: &str,
        task_id: &str,
        text: &str,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .await
            .execute(
                "UPDATE tasks SET text = ?1 WHERE assignment_id = ?2 AND id = ?3",
                libsql::params![text, assignment_id, task_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    pub async fn set_task_completed(
        &self,
        assignment_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .await
            .execute(
                "UPDATE tasks SET completed = ?1 WHERE assignment_id = ?2 AND id = ?3",
                libsql::params![i64::from(completed), assignment_id, task_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    pub async fn delete_task(&self, assignment_id: &str, task_id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .await
            .execute(
                "DELETE FROM tasks WHERE assignment_id = ?1 AND id = ?2",
                [assignment_id, task_id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// Write a generated plan in one transaction: the task set, `ai_summary`
    /// and `planned_description`.
    ///
    /// Without `replace`, an assignment that already has tasks is refused with
    /// `DatabaseError::Conflict`. With `replace`, old tasks are deleted first.
    /// On any error nothing is written.
    pub async fn commit_plan(
        &self,
        user_id: &str,
        planned: &Assignment,
        replace: bool,
    ) -> Result<(), DatabaseError> {
        let conn = self.db().conn().await;
        let tx = conn.transaction().await?;
        match write_plan(&tx, user_id, planned, replace).await {
            Ok(()) => {
                tx.commit().await?;
                tracing::debug!(assignment_id = %planned.id, tasks = planned.tasks.len(), replace, "plan committed");
                Ok(())
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(assignment_id = %planned.id, error = %rollback, "plan rollback failed");
                }
                Err(e)
            }
        }
    }
}
