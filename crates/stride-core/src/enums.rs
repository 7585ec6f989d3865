//! Status enums and entity types for Stride.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! Status enums with state machines provide `allowed_next_states()` to enforce
//! valid transitions at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// WorkflowState
// ---------------------------------------------------------------------------

/// State of one milestone-generation activation for an assignment.
///
/// ```text
/// idle → checking → has_existing_tasks → ready
///                 → generating → ready
///                              → failed
///      checking → idle (store read failed)
/// ```
///
/// `ready` and `failed` are terminal for an activation. A later activation
/// starts again from `idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum WorkflowState {
    Idle,
    Checking,
    HasExistingTasks,
    Generating,
    Ready,
    Failed,
}

impl WorkflowState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::Checking],
            Self::Checking => &[Self::HasExistingTasks, Self::Generating, Self::Idle],
            Self::HasExistingTasks => &[Self::Ready],
            Self::Generating => &[Self::Ready, Self::Failed],
            Self::Ready | Self::Failed => &[],
        }
    }

    /// Check whether transitioning to `next` is allowed.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether the activation has finished.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Ready | Self::Failed)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Checking => "checking",
            Self::HasExistingTasks => "has_existing_tasks",
            Self::Generating => "generating",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// AssignmentSource
// ---------------------------------------------------------------------------

/// Where an assignment came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentSource {
    #[default]
    Manual,
    Roster,
}

impl AssignmentSource {
    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Manual => "manual",
            Self::Roster => "roster",
        }
    }
}

impl fmt::Display for AssignmentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EntityType
// ---------------------------------------------------------------------------

/// Type of entity in the system, used in error reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EntityType {
    Assignment,
    Task,
    GroupProject,
    GroupTask,
    Branch,
    Member,
}

impl EntityType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Assignment => "assignment",
            Self::Task => "task",
            Self::GroupProject => "group_project",
            Self::GroupTask => "group_task",
            Self::Branch => "branch",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workflow_happy_paths_are_allowed() {
        let generated = [
            WorkflowState::Idle,
            WorkflowState::Checking,
            WorkflowState::Generating,
            WorkflowState::Ready,
        ];
        let existing = [
            WorkflowState::Idle,
            WorkflowState::Checking,
            WorkflowState::HasExistingTasks,
            WorkflowState::Ready,
        ];
        for path in [&generated[..], &existing[..]] {
            for pair in path.windows(2) {
                assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
            }
        }
    }

    #[test]
    fn failed_is_reachable_only_from_generating() {
        let all = [
            WorkflowState::Idle,
            WorkflowState::Checking,
            WorkflowState::HasExistingTasks,
            WorkflowState::Generating,
            WorkflowState::Ready,
            WorkflowState::Failed,
        ];
        for state in all {
            let reaches_failed = state.can_transition_to(WorkflowState::Failed);
            assert_eq!(reaches_failed, state == WorkflowState::Generating, "{state}");
        }
        assert!(WorkflowState::Failed.allowed_next_states().is_empty());
        assert!(WorkflowState::Ready.allowed_next_states().is_empty());
    }

    #[test]
    fn existing_tasks_never_lead_to_generation() {
        assert!(!WorkflowState::HasExistingTasks.can_transition_to(WorkflowState::Generating));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&WorkflowState::HasExistingTasks).unwrap();
        assert_eq!(json, "\"has_existing_tasks\"");
        assert_eq!(WorkflowState::HasExistingTasks.to_string(), "has_existing_tasks");
        assert_eq!(AssignmentSource::Roster.as_str(), "roster");
    }
}
