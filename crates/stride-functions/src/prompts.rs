//! Prompt text and the response schema sent to the model.

use serde_json::{Value, json};

/// Prompt asking for a milestone breakdown with hour estimates.
#[must_use]
pub fn milestones_prompt(title: &str, description: &str) -> String {
    format!(
        "Based on the following academic assignment, generate a concise, step-by-step list of \
         milestones to complete it.\n\
         Return the response as a JSON object containing a single key \"milestones\", which is \
         an array of objects.\n\
         Each object in the array should have two properties: a \"text\" (string) for the \
         milestone description and an \"eta\" (number) for the estimated hours.\n\n\
         Assignment Title: \"{title}\"\n\
         Description: \"{description}\"\n"
    )
}

/// Prompt asking for a one-sentence summary.
#[must_use]
pub fn summary_prompt(description: &str) -> String {
    format!(
        "Summarize the following assignment description into a single, user-friendly sentence \
         that clearly states the main goal.\n\
         Start the summary with an encouraging and clear phrase like \"Your main goal is to...\" \
         or \"For this assignment, you'll need to...\".\n\n\
         Description: \"{description}\"\n"
    )
}

/// Structured-output schema for the milestone reply, in the model API's
/// own schema dialect (upper-case type names).
#[must_use]
pub fn milestones_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "milestones": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "eta": { "type": "NUMBER" }
                    }
                }
            }
        }
    })
}
