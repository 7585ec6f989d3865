//! The persistence collaborator as seen by the planner.

use std::future::Future;

use stride_core::entities::{Assignment, ProfessorAnalysis, Task};
use stride_core::identity::UserSession;

use crate::error::PersistenceError;

/// Row-level access to assignments and their tasks.
///
/// Every method is one round trip to the store. Implementations must make
/// [`AssignmentStore::commit_plan`] atomic.
pub trait AssignmentStore: Send + Sync {
    /// Load an assignment together with its tasks in stored order.
    fn load_assignment(
        &self,
        assignment_id: &str,
    ) -> impl Future<Output = Result<Assignment, PersistenceError>> + Send;

    /// Tasks owned by an assignment, in stored order.
    fn tasks_for(
        &self,
        assignment_id: &str,
    ) -> impl Future<Output = Result<Vec<Task>, PersistenceError>> + Send;

    /// Write a generated plan: the assignment's tasks, `ai_summary` and
    /// `planned_description`, all or nothing.
    ///
    /// With `replace == false` the store must refuse with
    /// [`PersistenceError::Conflict`] if tasks already exist. With
    /// `replace == true` existing tasks are removed in the same transaction.
    fn commit_plan(
        &self,
        session: &UserSession,
        planned: &Assignment,
        replace: bool,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    /// Append one task after the existing ones.
    fn insert_task(
        &self,
        session: &UserSession,
        assignment_id: &str,
        task: &Task,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    fn update_task_text(
        &self,
        assignment_id: &str,
        task_id: &str,
        text: &str,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    fn set_task_completed(
        &self,
        assignment_id: &str,
        task_id: &str,
        completed: bool,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    fn delete_task(
        &self,
        assignment_id: &str,
        task_id: &str,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;

    /// Replace the assignment's professor analysis.
    fn save_professor_analysis(
        &self,
        assignment_id: &str,
        analysis: &ProfessorAnalysis,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}
