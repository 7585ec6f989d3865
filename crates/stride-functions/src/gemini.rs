//! Client for the hosted model's `generateContent` API.

use std::future::Future;
use std::time::Duration;

use serde_json::{Value, json};
use stride_config::GeminiConfig;

use crate::error::FunctionError;

/// A text-in, text-out language model.
pub trait TextModel: Send + Sync {
    /// Generate text for `prompt`. With `response_schema` the model is asked
    /// for JSON matching it.
    fn generate(
        &self,
        prompt: &str,
        response_schema: Option<Value>,
    ) -> impl Future<Output = Result<String, FunctionError>> + Send;
}

pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    /// # Errors
    ///
    /// Returns `FunctionError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &GeminiConfig) -> Result<Self, FunctionError> {
        let http = reqwest::Client::builder()
            .user_agent("stride-functions/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

/// Request body for one prompt.
#[must_use]
pub fn request_body(prompt: &str, response_schema: Option<Value>) -> Value {
    let mut body = json!({
        "contents": [{ "parts": [{ "text": prompt }] }],
    });
    if let Some(schema) = response_schema {
        body["generationConfig"] = json!({
            "responseMimeType": "application/json",
            "responseSchema": schema,
        });
    }
    body
}

/// Text of the first part of the first candidate.
///
/// # Errors
///
/// Returns `FunctionError::EmptyReply` when there is no such text, including
/// when the prompt was blocked.
pub fn extract_text(reply: &Value) -> Result<String, FunctionError> {
    if let Some(text) = reply
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
    {
        return Ok(text.to_string());
    }
    let reason = reply
        .pointer("/promptFeedback/blockReason")
        .or_else(|| reply.pointer("/candidates/0/finishReason"))
        .and_then(Value::as_str)
        .unwrap_or("no candidates");
    Err(FunctionError::EmptyReply(reason.to_string()))
}

/// Human-readable message from an error body, falling back to the raw text.
#[must_use]
pub fn upstream_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}

/// Error for a non-success reply. A blank message falls back to the
/// status reason.
fn upstream_error(status: reqwest::StatusCode, message: String) -> FunctionError {
    let message = if message.is_empty() {
        status.canonical_reason().unwrap_or("no reason given").to_string()
    } else {
        message
    };
    FunctionError::Upstream {
        status: status.as_u16(),
        message,
    }
}

impl TextModel for GeminiClient {
    async fn generate(
        &self,
        prompt: &str,
        response_schema: Option<Value>,
    ) -> Result<String, FunctionError> {
        let resp = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt, response_schema))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = match resp.text().await {
                Ok(body) => upstream_message(&body),
                Err(e) => {
                    tracing::warn!(status = status.as_u16(), error = %e, "could not read model error body");
                    String::new()
                }
            };
            return Err(upstream_error(status, message));
        }

        let reply: Value = resp.json().await?;
        let text = extract_text(&reply)?;
        tracing::debug!(model = %self.model, chars = text.len(), "model replied");
        Ok(text)
    }
}
