//! `AssignmentStore` over libSQL.

use stride_core::entities::{Assignment, ProfessorAnalysis, Task};
use stride_core::identity::UserSession;
use stride_planner::{AssignmentStore, PersistenceError};

use crate::error::DatabaseError;
use crate::service::StrideService;

/// Map a database error into what the planner understands.
fn persistence(op: &'static str, entity: &str, id: &str, e: DatabaseError) -> PersistenceError {
    match e {
        DatabaseError::NoResult => PersistenceError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        },
        DatabaseError::Conflict(assignment_id) => PersistenceError::Conflict { assignment_id },
        other => PersistenceError::backend(op, other),
    }
}

impl AssignmentStore for StrideService {
    async fn load_assignment(&self, assignment_id: &str) -> Result<Assignment, PersistenceError> {
        self.get_assignment(assignment_id)
            .await
            .map_err(|e| persistence("load_assignment", "assignment", assignment_id, e))
    }

    async fn tasks_for(&self, assignment_id: &str) -> Result<Vec<Task>, PersistenceError> {
        self.list_tasks(assignment_id)
            .await
            .map_err(|e| persistence("tasks_for", "assignment", assignment_id, e))
    }

    async fn commit_plan(
        &self,
        session: &UserSession,
        planned: &Assignment,
        replace: bool,
    ) -> Result<(), PersistenceError> {
        StrideService::commit_plan(self, &session.user_id, planned, replace)
            .await
            .map_err(|e| persistence("commit_plan", "assignment", &planned.id, e))
    }

    async fn insert_task(
        &self,
        session: &UserSession,
        assignment_id: &str,
        task: &Task,
    ) -> Result<(), PersistenceError> {
        StrideService::insert_task(self, &session.user_id, assignment_id, task)
            .await
            .map_err(|e| persistence("insert_task", "assignment", assignment_id, e))
    }

    async fn update_task_text(
        &self,
        assignment_id: &str,
        task_id: &str,
        text: &str,
    ) -> Result<(), PersistenceError> {
        StrideService::update_task_text(self, assignment_id, task_id, text)
            .await
            .map_err(|e| persistence("update_task_text", "task", task_id, e))
    }

    async fn set_task_completed(
        &self,
        assignment_id: &str,
        task_id: &str,
        completed: bool,
    ) -> Result<(), PersistenceError> {
        StrideService::set_task_completed(self, assignment_id, task_id, completed)
            .await
            .map_err(|e| persistence("set_task_completed", "task", task_id, e))
    }

    async fn delete_task(&self, assignment_id: &str, task_id: &str) -> Result<(), PersistenceError> {
        StrideService::delete_task(self, assignment_id, task_id)
            .await
            .map_err(|e| persistence("delete_task", "task", task_id, e))
    }

    async fn save_professor_analysis(
        &self,
        assignment_id: &str,
        analysis: &ProfessorAnalysis,
    ) -> Result<(), PersistenceError> {
        self.set_professor_analysis(assignment_id, analysis)
            .await
            .map_err(|e| persistence("save_professor_analysis", "assignment", assignment_id, e))
    }
}
