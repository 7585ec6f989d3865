//! Group project repository.
//!
//! A group project is saved as a whole: callers apply the pure operations on
//! `GroupProject` and hand the new value to [`StrideService::save_group_project`].

use std::collections::BTreeMap;

use chrono::Utc;

use stride_core::entities::{BranchUpdate, GroupProject, GroupTask, Member};

use crate::error::DatabaseError;
use crate::helpers::{
    format_optional_date, get_bool, parse_json_column, parse_optional_date, get_opt_string,
    to_json_column,
};
use crate::service::StrideService;

const SELECT_COLS: &str =
    "id, title, course, members, due_date, description, versions, active_branch";

const TASK_COLS: &str = "id, text, completed, eta, assignee";

fn row_to_group_project(row: &libsql::Row) -> Result<GroupProject, DatabaseError> {
    let members: Vec<Member> = parse_json_column(&row.get::<String>(3)?, "members")?;
    let versions: BTreeMap<String, Vec<BranchUpdate>> =
        parse_json_column(&row.get::<String>(6)?, "versions")?;
    Ok(GroupProject {
        id: row.get(0)?,
        title: row.get(1)?,
        course: row.get(2)?,
        members,
        due_date: parse_optional_date(get_opt_string(row, 4)?.as_deref())?,
        description: row.get(5)?,
        tasks: Vec::new(),
        versions,
        active_branch: row.get(7)?,
    })
}

fn row_to_group_task(row: &libsql::Row) -> Result<GroupTask, DatabaseError> {
    Ok(GroupTask {
        id: row.get(0)?,
        text: row.get(1)?,
        completed: get_bool(row, 2)?,
        eta: row.get(3)?,
        assignee: row.get(4)?,
    })
}

async fn insert_group_tasks(
    conn: &libsql::Connection,
    project_id: &str,
    tasks: &[GroupTask],
) -> Result<(), DatabaseError> {
    for (position, task) in (0_i64..).zip(tasks) {
        conn.execute(
            &format!(
                "INSERT INTO group_tasks (group_project_id, position, {TASK_COLS})
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)"
            ),
            libsql::params![
                project_id,
                position,
                task.id.as_str(),
                task.text.as_str(),
                i64::from(task.completed),
                task.eta,
                task.assignee.as_str()
            ],
        )
        .await?;
    }
    Ok(())
}

async fn query_group_tasks(
    conn: &libsql::Connection,
    project_id: &str,
) -> Result<Vec<GroupTask>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!(
                "SELECT {TASK_COLS} FROM group_tasks WHERE group_project_id = ?1
                 ORDER BY position, id"
            ),
            [project_id],
        )
        .await?;
    let mut tasks = Vec::new();
    while let Some(row) = rows.next().await? {
        tasks.push(row_to_group_task(&row)?);
    }
    Ok(tasks)
}

impl StrideService {
    pub async fn create_group_project(
        &self,
        user_id: &str,
        project: &GroupProject,
    ) -> Result<(), DatabaseError> {
        let now = Utc::now().to_rfc3339();
        let conn = self.db().conn().await;
        let tx = conn.transaction().await?;
        tx.execute(
            &format!(
                "INSERT INTO group_projects ({SELECT_COLS}, user_id, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)"
            ),
            libsql::params![
                project.id.as_str(),
                project.title.as_str(),
                project.course.as_str(),
                to_json_column(&project.members)?,
                format_optional_date(project.due_date),
                project.description.as_str(),
                to_json_column(&project.versions)?,
                project.active_branch.as_str(),
                user_id,
                now.as_str(),
                now.as_str()
            ],
        )
        .await?;
        insert_group_tasks(&tx, &project.id, &project.tasks).await?;
        tx.commit().await?;
        Ok(())
    }

    pub async fn get_group_project(&self, id: &str) -> Result<GroupProject, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!("SELECT {SELECT_COLS} FROM group_projects WHERE id = ?1"),
                [id],
            )
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let mut project = row_to_group_project(&row)?;
        project.tasks = query_group_tasks(&conn, id).await?;
        Ok(project)
    }

    pub async fn list_group_projects(&self, user_id: &str) -> Result<Vec<GroupProject>, DatabaseError> {
        let conn = self.db().conn().await;
        let mut rows = conn
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM group_projects WHERE user_id = ?1
                     ORDER BY created_at, id"
                ),
                [user_id],
            )
            .await?;
        let mut projects = Vec::new();
        while let Some(row) = rows.next().await? {
            projects.push(row_to_group_project(&row)?);
        }
        for project in &mut projects {
            project.tasks = query_group_tasks(&conn, &project.id).await?;
        }
        Ok(projects)
    }

    pub async fn list_group_tasks(&self, project_id: &str) -> Result<Vec<GroupTask>, DatabaseError> {
        let conn = self.db().conn().await;
        query_group_tasks(&conn, project_id).await
    }

    /// Overwrite a stored project with `project`, tasks included, in one
    /// transaction.
    pub async fn save_group_project(&self, project: &GroupProject) -> Result<(), DatabaseError> {
        let conn = self.db().conn().await;
        let tx = conn.transaction().await?;
        let changed = tx
            .execute(
                "UPDATE group_projects
                 SET title = ?1, course = ?2, members = ?3, due_date = ?4, description = ?5,
                     versions = ?6, active_branch = ?7, updated_at = ?8
                 WHERE id = ?9",
                libsql::params![
                    project.title.as_str(),
                    project.course.as_str(),
                    to_json_column(&project.members)?,
                    format_optional_date(project.due_date),
                    project.description.as_str(),
                    to_json_column(&project.versions)?,
                    project.active_branch.as_str(),
                    Utc::now().to_rfc3339(),
                    project.id.as_str()
                ],
            )
            .await?;
        if changed == 0 {
            tx.rollback().await?;
            return Err(DatabaseError::NoResult);
        }
        tx.execute(
            "DELETE FROM group_tasks WHERE group_project_id = ?1",
            [project.id.as_str()],
        )
        .await?;
        insert_group_tasks(&tx, &project.id, &project.tasks).await?;
        tx.commit().await?;
        tracing::debug!(project_id = %project.id, branch = %project.active_branch, "group project saved");
        Ok(())
    }

    pub async fn delete_group_project(&self, id: &str) -> Result<(), DatabaseError> {
        let changed = self
            .db()
            .conn()
            .await
            .execute("DELETE FROM group_projects WHERE id = ?1", [id])
            .await?;
        if changed == 0 {
            return Err(DatabaseError::NoResult);
        }
        Ok(())
    }
}
