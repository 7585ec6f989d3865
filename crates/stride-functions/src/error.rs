//! Error type for the generation functions.
//!
//! Every failure reaches the caller as `400 {"error": message}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use stride_core::functions::ErrorReply;
use stride_schema::SchemaError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FunctionError {
    /// The request body is not the expected payload.
    #[error("invalid request: {0}")]
    BadRequest(String),

    /// The model API answered with a non-success status.
    #[error("Gemini API failed with status {status}: {message}")]
    Upstream { status: u16, message: String },

    /// The model reply had no candidate text.
    #[error("model reply has no text: {0}")]
    EmptyReply(String),

    /// The model's text did not match the requested JSON shape.
    #[error("model returned invalid JSON: {0}")]
    ModelOutput(String),

    #[error("model API unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FunctionError {
    /// Request body that failed schema validation or decoding.
    pub(crate) fn bad_request(e: &SchemaError) -> Self {
        match e {
            SchemaError::ValidationFailed { errors } => Self::BadRequest(errors.join("; ")),
            other => Self::BadRequest(other.to_string()),
        }
    }

    /// Model text that failed schema validation or decoding.
    pub(crate) fn model_output(e: &SchemaError) -> Self {
        match e {
            SchemaError::ValidationFailed { errors } => Self::ModelOutput(errors.join("; ")),
            other => Self::ModelOutput(other.to_string()),
        }
    }
}

impl IntoResponse for FunctionError {
    fn into_response(self) -> Response {
        tracing::warn!(error = %self, "generation function failed");
        let body = ErrorReply {
            error: self.to_string(),
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn every_error_is_a_400_with_error_body() {
        let resp = FunctionError::Upstream {
            status: 403,
            message: "API key not valid".into(),
        }
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body: ErrorReply = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.error, "Gemini API failed with status 403: API key not valid");
    }
}
