//! Shared response handling for both generation functions.
//!
//! A call fails when the status is not 2xx, or when a 2xx body carries an
//! `error` field. Everything else must be a JSON object.

use serde_json::Value;
use stride_core::functions::ErrorReply;
use stride_planner::GenerationError;

use crate::error::transport;

/// Check an HTTP response and return its JSON body.
///
/// - **Non-success status** with an `{error}` body → [`GenerationError::Remote`],
///   otherwise [`GenerationError::Status`] with the raw body.
/// - **2xx with an `error` field** → [`GenerationError::Remote`].
/// - **2xx that is not a JSON object** → [`GenerationError::Malformed`].
pub(crate) async fn check_response(
    endpoint: &str,
    resp: reqwest::Response,
) -> Result<Value, GenerationError> {
    let status = resp.status();
    let body = resp.text().await.map_err(|e| transport(endpoint, e))?;

    if !status.is_success() {
        if let Ok(reply) = serde_json::from_str::<ErrorReply>(&body) {
            return Err(GenerationError::Remote {
                endpoint: endpoint.to_string(),
                message: reply.error,
            });
        }
        return Err(GenerationError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            body,
        });
    }

    let value: Value = serde_json::from_str(&body)
        .map_err(|e| GenerationError::malformed(endpoint, format!("body is not JSON: {e}")))?;
    if !value.is_object() {
        return Err(GenerationError::malformed(endpoint, "body is not a JSON object"));
    }
    if let Some(error) = value.get("error") {
        let message = error
            .as_str()
            .map_or_else(|| error.to_string(), str::to_string);
        return Err(GenerationError::Remote {
            endpoint: endpoint.to_string(),
            message,
        });
    }
    Ok(value)
}
