//! Cross-cutting error types for Stride.
//!
//! This module defines errors raised by the pure domain rules. Store and
//! generation failures are defined next to the code that talks to those
//! collaborators (`stride-db`, `stride-planner`).

use thiserror::Error;

/// Errors that can be raised by the domain rules in this crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// A state machine transition was attempted that is not allowed.
    #[error("Invalid state transition: {entity_type} {id} from {from} to {to}")]
    InvalidTransition {
        entity_type: String,
        id: String,
        from: String,
        to: String,
    },

    /// User input failed validation (missing text, bad estimate, bad branch name).
    #[error("Validation error: {0}")]
    Validation(String),

    /// The operating system could not provide randomness for a new ID.
    #[error("ID generation failed: {0}")]
    IdGeneration(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    pub(crate) fn not_found(entity_type: &str, id: &str) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}
