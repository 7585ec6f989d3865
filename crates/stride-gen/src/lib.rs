//! # stride-gen
//!
//! HTTP client for the two generation functions:
//! - `generate-milestones`: assignment title and description in, milestone
//!   list out
//! - `summarize-description`: description in, one-sentence summary out
//!
//! Replies are untrusted. Each one goes through the response check in
//! [`http`] and then through the schema registry before it is decoded.

mod error;
mod http;

use std::time::{Duration, Instant};

use serde::Serialize;
use serde::de::DeserializeOwned;
use stride_config::FunctionsConfig;
use stride_core::functions::{
    self, GENERATE_MILESTONES, GeneratedMilestone, MilestonesReply, MilestonesRequest,
    SUMMARIZE_DESCRIPTION, SummaryReply, SummaryRequest,
};
use stride_planner::{GenerationError, MilestoneGenerator, Summarizer};
use stride_schema::{SchemaRegistry, names};

use crate::error::{malformed, transport};
use crate::http::check_response;

/// Client for the generation functions service.
pub struct FunctionsClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    schema: SchemaRegistry,
}

impl FunctionsClient {
    /// Build a client from the `[functions]` config section.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Transport` if the HTTP client cannot be built.
    pub fn new(config: &FunctionsConfig) -> Result<Self, GenerationError> {
        let http = reqwest::Client::builder()
            .user_agent("stride/0.1")
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| transport("client", e))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            schema: SchemaRegistry::new(),
        })
    }

    /// Full URL of a function.
    #[must_use]
    pub fn url(&self, function: &str) -> String {
        format!("{}{}", self.base_url, functions::path(function))
    }

    /// POST `body` to a function and decode the reply as `schema`.
    async fn call<B, R>(&self, function: &str, body: &B, schema: &str) -> Result<R, GenerationError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let started = Instant::now();
        let mut request = self.http.post(self.url(function)).json(body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }
        let resp = request.send().await.map_err(|e| transport(function, e))?;
        let status = resp.status().as_u16();
        let value = check_response(function, resp).await;
        tracing::debug!(
            function,
            status,
            elapsed_ms = started.elapsed().as_millis(),
            ok = value.is_ok(),
            "generation function call"
        );
        self.schema
            .parse(schema, value?)
            .map_err(|e| malformed(function, &e))
    }
}

impl MilestoneGenerator for FunctionsClient {
    async fn generate_milestones(
        &self,
        request: &MilestonesRequest,
    ) -> Result<Vec<GeneratedMilestone>, GenerationError> {
        let reply: MilestonesReply = self
            .call(GENERATE_MILESTONES, request, names::MILESTONES_REPLY)
            .await?;
        Ok(reply.milestones)
    }
}

impl Summarizer for FunctionsClient {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, GenerationError> {
        let reply: SummaryReply = self
            .call(SUMMARIZE_DESCRIPTION, request, names::SUMMARY_REPLY)
            .await?;
        Ok(reply.summary.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(base_url: &str) -> FunctionsConfig {
        FunctionsConfig {
            base_url: base_url.to_string(),
            timeout_secs: 2,
            ..FunctionsConfig::default()
        }
    }

    #[test]
    fn urls_join_base_and_function_path() {
        let client = FunctionsClient::new(&config("https://project.functions.example/")).unwrap();
        assert_eq!(
            client.url(GENERATE_MILESTONES),
            "https://project.functions.example/functions/v1/generate-milestones"
        );
        assert_eq!(
            client.url(SUMMARIZE_DESCRIPTION),
            "https://project.functions.example/functions/v1/summarize-description"
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_a_transport_error() {
        let client = FunctionsClient::new(&config("http://127.0.0.1:9")).unwrap();
        let err = client
            .summarize(&SummaryRequest {
                description: "Write 10 pages".into(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::Transport { .. }));
        assert_eq!(err.endpoint(), SUMMARIZE_DESCRIPTION);
    }

    #[test]
    fn one_bad_item_does_not_reject_the_reply() {
        let reply: MilestonesReply = SchemaRegistry::new()
            .parse(
                names::MILESTONES_REPLY,
                serde_json::json!({"milestones": [
                    {"text": "Research", "eta": "2"},
                    {"text": null, "eta": 4},
                    {"text": "Draft", "eta": 3}
                ]}),
            )
            .unwrap();
        let plan = stride_core::milestones::from_generated(reply.milestones).unwrap();
        let tasks: Vec<(&str, f64)> = plan.tasks().iter().map(|t| (t.text.as_str(), t.eta)).collect();
        assert_eq!(tasks, vec![("Research", 2.0), ("Draft", 3.0)]);
    }

    #[test]
    fn schema_failures_name_the_function() {
        let registry = SchemaRegistry::new();
        let err = registry
            .parse::<MilestonesReply>(names::MILESTONES_REPLY, serde_json::json!({"milestones": "none"}))
            .unwrap_err();
        let mapped = malformed(GENERATE_MILESTONES, &err);
        assert!(matches!(mapped, GenerationError::Malformed { .. }));
        assert_eq!(mapped.endpoint(), GENERATE_MILESTONES);
    }
}
