//! Assignment repository: CRUD, summary updates and roster import.

use chrono::{NaiveDate, Utc};

use stride_core::entities::{Assignment, ProfessorAnalysis};
use stride_core::roster::RosterAssignment;
use stride_schema::{SchemaRegistry, names};

use crate::error::DatabaseError;
use crate::helpers::{
    format_optional_date, get_opt_string, parse_enum, parse_optional_date, parse_optional_json,
    to_json_column,
};
use crate::repos::task::{insert_task_rows, query_tasks};
use crate::service::StrideService;

const SELECT_COLS: &str = "id, title, course, due_date, description, ai_summary, \
     professor_analysis, planned_description, source";

/// Row without its tasks.
fn row_to_assignment(row: &libsql::Row, schema: &SchemaRegistry) -> Result<Assignment, DatabaseError> {
    let analysis = parse_optional_json(get_opt_string(row, 6)?.as_deref())?
        .map(|value| schema.parse::<ProfessorAnalysis>(names::PROFESSOR_ANALYSIS, value))
        .transpose()
        .map_err(|e| DatabaseError::InvalidState(format!("professor_analysis column: {e}")))?;

    Ok(Assignment {
        id: row.get(0)?,
        title: row.get(1)?,
        course: row.get(2)?,
        due_date: parse_optional_date(get_opt_string(row, 3)?.as_deref())?,
        description: row.get(4)?,
        ai_summary: get_opt_string(row, 5)?,
        professor_analysis: analysis,
        planned_description: get_opt_string(row, 7)?,
        source: parse_enum(&row.get::<String>(8)?)?,
        tasks: Vec::new(),
    })
}

fn analysis_column(assignment: &Assignment) -> Result<Option<String>, DatabaseError> {
    assignment
        .professor_analysis
        .as_ref()
        .map(to_json_column)
        .transpose()
}

impl StrideService {
    /// Insert an assignment together with any tasks it already has.
    pub async fn create_assignment(
        &self,
        user_id: &str,
        assignment: &Assignment,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.db().conn().await;
        let tx = conn.transaction().await?;

        tx.execute(
            &format!(
                "INSERT INTO assignments ({SELECT_COLS}, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
            ),
            libsql::params![
                assignment.id.as_str(),
                assignment.title.as_str(),
                assignment.course.as_str(),
                format_optional_date(assignment.due_date),
                assignment.description.as_str(),
                assignment.ai_summary.as_deref(),
                analysis_column(assignment)?,
                assignment.planned_description.as_deref(),
                assignment.source.as_str(),
                user_id,
                now.as_str(),
                now.as_str()
            ],
        )
        .await?;
        insert_task_rows(&tx, user_id, &assignment.id, &assignment.tasks, 0).await?;
        tx.commit().await?;

        tracing::debug!(assignment_id = %assignment.id, tasks = assignment.tasks.len(), "assignment created");
        Ok(())
    }

    /// Load an assignment with its tasks in stored order.
    pub async fn get_assignment(&self, id: &str) -> Result<Assignment, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!("SELECT {SELECT_COLS} FROM assignments WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let mut assignment = row_to_assignment(&row, self.schema())?;
        assignment.tasks = query_tasks(&conn, id).await?;
        Ok(assignment)
    }

    /// All assignments of a user with their tasks, soonest due first.
    /// Assignments without a due date come last.
    pub async fn list_assignments(&self, user_id: &str) -> Result<Vec<Assignment>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM assignments WHERE user_id = ?1
                     ORDER BY due_date IS NULL, due_date, created_at, id"
                ),
                [user_id],
            )
            .await?;

        let mut assignments = Vec::new();
        while let Some(row) = rows.next().await? {
            assignments.push(row_to_assignment(&row, self.schema())?);
        }
        for assignment in &mut assignments {
            assignment.tasks = query_tasks(&conn, &assignment.id).await?;
        }
        Ok(assignments)
    }

    /// Update the user-editable fields. Tasks and the summary are untouched.
    pub async fn update_assignment_details(
        &self,
        id: &str,
        title: &str,
        course: &str,
        due_date: Option<NaiveDate>,
        description: &str,
    ) -> Result<Assignment, DatabaseError> {
        let changed = self
            .db()
            .conn()
            .await
            .execute(
                "UPDATE assignments
                 SET title = ?1, course = ?2, due_date = ?3, description = ?4, updated_at = ?5
                 WHERE id = ?6",
                libsql::params![
                    title,
                    course,
                    format_optional_date(due_date),
                    description,
                    Utc::now().to_rfc3339(),
                    id
                ],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        self.get_assignment(id).await
    }

    pub async fn set_ai_summary(&self, id: &str, summary: Option<&str>) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .await
            .execute(
                "UPDATE assignments SET ai_summary = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![summary, Utc::now().to_rfc3339(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    pub async fn set_professor_analysis(
        &self,
        id: &str,
        analysis: &ProfessorAnalysis,
    ) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .await
            .execute(
                "UPDATE assignments SET professor_analysis = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![to_json_column(analysis)?, Utc::now().to_rfc3339(), id],
            )
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// Delete an assignment. Its tasks go with it.
    pub async fn delete_assignment(&self, id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .await
            .execute("DELETE FROM assignments WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }

    /// Import roster assignments as unplanned assignments.
    ///
    /// Assignments whose ID is already stored are skipped. Returns how many
    /// were added.
    pub async fn import_roster(
        &self,
        user_id: &str,
        roster: Vec<RosterAssignment>,
    ) -> Result<usize, DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.db().conn().await;
        let tx = conn.transaction().await?;
        let mut added = 0usize;

        for item in roster {
            let assignment = item.into_assignment();
            let inserted = tx
                .execute(
                    &format!(
                        "INSERT OR IGNORE INTO assignments ({SELECT_COLS}, user_id, created_at, updated_at)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)"
                    ),
                    libsql::params![
                        assignment.id.as_str(),
                        assignment.title.as_str(),
                        assignment.course.as_str(),
                        format_optional_date(assignment.due_date),
                        assignment.description.as_str(),
                        assignment.ai_summary.as_deref(),
                        analysis_column(&assignment)?,
                        assignment.planned_description.as_deref(),
                        assignment.source.as_str(),
                        user_id,
                        now.as_str(),
                        now.as_str()
                    ],
                )
                .await?;
            if inserted == 0 {
                tracing::debug!(assignment_id = %assignment.id, "roster assignment already stored, skipped");
            } else {
                added += 1;
            }
        }

        tx.commit().await?;
        tracing::info!(added, "roster imported");
        Ok(added)
    }
}
