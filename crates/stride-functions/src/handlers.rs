//! Request handlers for the generation functions.

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};
use stride_core::functions::{MilestonesReply, MilestonesRequest, SummaryReply, SummaryRequest};
use stride_schema::names;

use crate::error::FunctionError;
use crate::gemini::TextModel;
use crate::prompts;
use crate::routes::AppState;

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// `POST /functions/v1/generate-milestones`
pub async fn generate_milestones<M: TextModel>(
    State(state): State<AppState<M>>,
    body: String,
) -> Result<Json<MilestonesReply>, FunctionError> {
    let request: MilestonesRequest = state
        .schema
        .parse_str(names::MILESTONES_REQUEST, &body)
        .map_err(|e| FunctionError::bad_request(&e))?;

    let prompt =
        prompts::milestones_prompt(&request.assignment_title, &request.assignment_description);
    let text = state
        .model
        .generate(&prompt, Some(prompts::milestones_response_schema()))
        .await?;

    let reply: MilestonesReply = state
        .schema
        .parse_str(names::MILESTONES_REPLY, &text)
        .map_err(|e| FunctionError::model_output(&e))?;
    tracing::info!(
        title = %request.assignment_title,
        milestones = reply.milestones.len(),
        "milestones generated"
    );
    Ok(Json(reply))
}

/// `POST /functions/v1/summarize-description`
pub async fn summarize_description<M: TextModel>(
    State(state): State<AppState<M>>,
    body: String,
) -> Result<Json<SummaryReply>, FunctionError> {
    let request: SummaryRequest = state
        .schema
        .parse_str(names::SUMMARY_REQUEST, &body)
        .map_err(|e| FunctionError::bad_request(&e))?;

    let text = state
        .model
        .generate(&prompts::summary_prompt(&request.description), None)
        .await?;
    let summary = text.trim();
    if summary.is_empty() {
        return Err(FunctionError::EmptyReply("blank summary".into()));
    }
    tracing::info!(chars = summary.len(), "description summarized");
    Ok(Json(SummaryReply {
        summary: summary.to_string(),
    }))
}
