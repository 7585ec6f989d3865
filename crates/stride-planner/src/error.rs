//! Error types for the planner and its collaborators.
//!
//! `PersistenceError` and `GenerationError` are what store and generator
//! implementations return. `PlannerError` is what callers of the planner see.

use stride_core::errors::CoreError;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A failed read or write against the assignment store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("{entity} {id} not found in store")]
    NotFound { entity: String, id: String },

    /// Tasks were written for this assignment by someone else first.
    #[error("assignment {assignment_id} already has tasks")]
    Conflict { assignment_id: String },

    #[error("store operation '{op}' failed: {source}")]
    Backend {
        op: &'static str,
        #[source]
        source: BoxError,
    },
}

impl PersistenceError {
    pub fn backend(op: &'static str, source: impl Into<BoxError>) -> Self {
        Self::Backend {
            op,
            source: source.into(),
        }
    }
}

/// A failed call to a generation function.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The function answered with an `error` field.
    #[error("{endpoint} failed: {message}")]
    Remote { endpoint: String, message: String },

    /// Non-success status without a readable error message.
    #[error("{endpoint} returned HTTP {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },

    /// The reply did not have the expected shape, or had no usable content.
    #[error("{endpoint} returned a malformed reply: {reason}")]
    Malformed { endpoint: String, reason: String },

    #[error("{endpoint} could not be reached: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: BoxError,
    },
}

impl GenerationError {
    pub fn malformed(endpoint: &str, reason: impl Into<String>) -> Self {
        Self::Malformed {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }

    /// Name of the function that failed.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        match self {
            Self::Remote { endpoint, .. }
            | Self::Status { endpoint, .. }
            | Self::Malformed { endpoint, .. }
            | Self::Transport { endpoint, .. } => endpoint,
        }
    }
}

/// Errors surfaced by [`crate::Planner`].
#[derive(Debug, Error)]
pub enum PlannerError {
    /// Rejected input or unknown task. Local state is unchanged.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A store write or read failed. For edits, local state is unchanged.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Milestone generation failed. Nothing was written.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// The last generation for this assignment failed and the policy forbids retrying.
    #[error("retrying generation for assignment {assignment_id} is disabled")]
    RetryNotAllowed { assignment_id: String },

    #[error("no signed-in user")]
    Unauthenticated,
}
