//! One activation of the generation workflow and its state trace.

use stride_core::enums::{EntityType, WorkflowState};
use stride_core::errors::CoreError;

/// The states one activation has passed through, starting at `idle`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    assignment_id: String,
    trace: Vec<WorkflowState>,
}

impl Activation {
    #[must_use]
    pub fn start(assignment_id: &str) -> Self {
        Self {
            assignment_id: assignment_id.to_string(),
            trace: vec![WorkflowState::Idle],
        }
    }

    #[must_use]
    pub fn assignment_id(&self) -> &str {
        &self.assignment_id
    }

    #[must_use]
    pub fn state(&self) -> WorkflowState {
        self.trace.last().copied().unwrap_or(WorkflowState::Idle)
    }

    #[must_use]
    pub fn trace(&self) -> &[WorkflowState] {
        &self.trace
    }

    /// Move to `next`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTransition` if the transition table forbids it.
    pub fn advance(&mut self, next: WorkflowState) -> Result<(), CoreError> {
        let current = self.state();
        if !current.can_transition_to(next) {
            return Err(CoreError::InvalidTransition {
                entity_type: EntityType::Assignment.to_string(),
                id: self.assignment_id.clone(),
                from: current.to_string(),
                to: next.to_string(),
            });
        }
        tracing::info!(assignment_id = %self.assignment_id, from = %current, to = %next, "workflow transition");
        self.trace.push(next);
        Ok(())
    }
}
