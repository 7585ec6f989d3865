//! Per-assignment mutual exclusion for workflow activations.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, PoisonError};

use stride_core::enums::WorkflowState;

/// Assignment IDs with a running activation, plus the last state of each.
#[derive(Debug, Default)]
pub(crate) struct Registry {
    in_flight: Mutex<HashSet<String>>,
    states: Mutex<HashMap<String, WorkflowState>>,
}

impl Registry {
    /// Claim `assignment_id`. Returns `None` if another activation holds it.
    pub(crate) fn try_claim<'a>(&'a self, assignment_id: &str) -> Option<InFlight<'a>> {
        let mut set = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if !set.insert(assignment_id.to_string()) {
            return None;
        }
        Some(InFlight {
            registry: self,
            assignment_id: assignment_id.to_string(),
        })
    }

    pub(crate) fn record(&self, assignment_id: &str, state: WorkflowState) {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(assignment_id.to_string(), state);
    }

    pub(crate) fn state(&self, assignment_id: &str) -> Option<WorkflowState> {
        self.states
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(assignment_id)
            .copied()
    }
}

/// Held for the duration of one activation. Released on drop, including when
/// the activation future is cancelled.
pub(crate) struct InFlight<'a> {
    registry: &'a Registry,
    assignment_id: String,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        // A cancelled activation never reached ready/failed.
        let mut states = self
            .registry
            .states
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(state) = states.get_mut(&self.assignment_id) {
            if !state.is_terminal() {
                *state = WorkflowState::Idle;
            }
        }
        drop(states);

        self.registry
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.assignment_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_claim_is_refused_until_release() {
        let registry = Registry::default();
        let first = registry.try_claim("asg-1").unwrap();
        assert!(registry.try_claim("asg-1").is_none());
        assert!(registry.try_claim("asg-2").is_some());
        drop(first);
        assert!(registry.try_claim("asg-1").is_some());
    }

    #[test]
    fn release_resets_unfinished_state() {
        let registry = Registry::default();
        let guard = registry.try_claim("asg-1").unwrap();
        registry.record("asg-1", WorkflowState::Generating);
        drop(guard);
        assert_eq!(registry.state("asg-1"), Some(WorkflowState::Idle));

        let guard = registry.try_claim("asg-1").unwrap();
        registry.record("asg-1", WorkflowState::Failed);
        drop(guard);
        assert_eq!(registry.state("asg-1"), Some(WorkflowState::Failed));
    }
}
