//! Persisted assignment edits.
//!
//! Each operation validates against the caller's assignment, issues exactly
//! one store write, and replaces the caller's value only after the write
//! succeeded. A failed write therefore leaves local state matching storage.
//! Nothing is retried here.

use stride_core::entities::{Assignment, Task};
use stride_core::identity::UserSession;

use crate::error::PlannerError;
use crate::generate::{MilestoneGenerator, Summarizer};
use crate::planner::Planner;
use crate::store::AssignmentStore;

impl<S, M, Z> Planner<S, M, Z>
where
    S: AssignmentStore,
    M: MilestoneGenerator,
    Z: Summarizer,
{
    /// Add a manually entered milestone. `eta` is the raw form input.
    ///
    /// # Errors
    ///
    /// `PlannerError::Unauthenticated` without a signed-in user,
    /// `PlannerError::Core` for invalid input, `PlannerError::Persistence` if
    /// the insert fails.
    pub async fn add_task(
        &self,
        session: &UserSession,
        assignment: &mut Assignment,
        text: &str,
        eta: &str,
    ) -> Result<Task, PlannerError> {
        if !session.is_authenticated() {
            return Err(PlannerError::Unauthenticated);
        }
        let (next, task) = assignment.add_task(text, eta)?;
        self.store().insert_task(session, &assignment.id, &task).await?;
        *assignment = next;
        Ok(task)
    }

    /// # Errors
    ///
    /// `PlannerError::Core` for an unknown task or blank text,
    /// `PlannerError::Persistence` if the update fails.
    pub async fn edit_task_text(
        &self,
        assignment: &mut Assignment,
        task_id: &str,
        text: &str,
    ) -> Result<(), PlannerError> {
        let next = assignment.edit_task_text(task_id, text)?;
        let new_text = next.task(task_id).map_or(text, |t| t.text.as_str());
        self.store()
            .update_task_text(&assignment.id, task_id, new_text)
            .await?;
        *assignment = next;
        Ok(())
    }

    /// # Errors
    ///
    /// `PlannerError::Core` for an unknown task, `PlannerError::Persistence`
    /// if the delete fails.
    pub async fn delete_task(
        &self,
        assignment: &mut Assignment,
        task_id: &str,
    ) -> Result<(), PlannerError> {
        let next = assignment.delete_task(task_id)?;
        self.store().delete_task(&assignment.id, task_id).await?;
        *assignment = next;
        Ok(())
    }

    /// Flip a task's completed flag and return the new value.
    ///
    /// # Errors
    ///
    /// `PlannerError::Core` for an unknown task, `PlannerError::Persistence`
    /// if the update fails.
    pub async fn toggle_task_completed(
        &self,
        assignment: &mut Assignment,
        task_id: &str,
    ) -> Result<bool, PlannerError> {
        let next = assignment.toggle_task_completed(task_id)?;
        let completed = next.task(task_id).is_some_and(|t| t.completed);
        self.store()
            .set_task_completed(&assignment.id, task_id, completed)
            .await?;
        *assignment = next;
        Ok(completed)
    }
}
