//! Schema validation error types.

use thiserror::Error;

/// Errors from the schema registry.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("no schema registered as '{0}'")]
    NotFound(String),

    /// JSON value did not pass schema validation.
    #[error("does not match schema: {}", .errors.join("; "))]
    ValidationFailed {
        /// Individual error messages from the validator.
        errors: Vec<String>,
    },

    /// Not JSON, or valid JSON that still does not fit the target type.
    #[error("cannot decode '{schema}': {reason}")]
    Decode { schema: String, reason: String },

    /// A registered schema failed to compile.
    #[error("schema compile error: {0}")]
    Generation(String),
}
