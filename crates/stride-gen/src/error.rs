//! Mapping of transport and decoding failures onto `GenerationError`.

use stride_planner::GenerationError;
use stride_schema::SchemaError;

pub(crate) fn transport(endpoint: &str, e: reqwest::Error) -> GenerationError {
    GenerationError::Transport {
        endpoint: endpoint.to_string(),
        source: Box::new(e),
    }
}

/// A reply that failed schema validation or decoding.
pub(crate) fn malformed(endpoint: &str, e: &SchemaError) -> GenerationError {
    match e {
        SchemaError::ValidationFailed { errors } => {
            GenerationError::malformed(endpoint, errors.join("; "))
        }
        other => GenerationError::malformed(endpoint, other.to_string()),
    }
}
