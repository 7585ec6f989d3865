//! Request and reply payloads of the two generation functions.
//!
//! Field names follow the wire format (`assignmentTitle`, ...). Replies are
//! untrusted: every field a model may omit has a serde default, and blank or
//! missing values are normalised by the milestone builder rather than here.

use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Function name of the milestone breakdown endpoint.
pub const GENERATE_MILESTONES: &str = "generate-milestones";

/// Function name of the one-sentence summary endpoint.
pub const SUMMARIZE_DESCRIPTION: &str = "summarize-description";

/// URL path under which a function is served, e.g. `/functions/v1/generate-milestones`.
#[must_use]
pub fn path(function: &str) -> String {
    format!("/functions/v1/{function}")
}

/// Body of a `generate-milestones` call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MilestonesRequest {
    pub assignment_title: String,
    pub assignment_description: String,
}

/// One milestone as produced by a model: text plus an optional hour estimate.
///
/// Both fields accept any JSON value. Text that is not a string or number
/// reads as blank, and an estimate that is not a number or numeric string
/// reads as missing, so the builder can drop or default that one item.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GeneratedMilestone {
    #[serde(default, deserialize_with = "lenient_text")]
    #[schemars(with = "Value")]
    pub text: String,
    #[serde(
        default,
        deserialize_with = "lenient_eta",
        skip_serializing_if = "Option::is_none"
    )]
    #[schemars(with = "Value")]
    pub eta: Option<f64>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(text) => text,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

fn lenient_eta<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(raw) => raw.trim().parse().ok(),
        _ => None,
    })
}

impl GeneratedMilestone {
    #[must_use]
    pub fn new(text: impl Into<String>, eta: Option<f64>) -> Self {
        Self {
            text: text.into(),
            eta,
        }
    }
}

/// Successful `generate-milestones` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct MilestonesReply {
    pub milestones: Vec<GeneratedMilestone>,
}

/// Body of a `summarize-description` call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SummaryRequest {
    pub description: String,
}

/// Successful `summarize-description` reply.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SummaryReply {
    pub summary: String,
}

/// Failure reply of either function.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ErrorReply {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn milestones_request_uses_camel_case() {
        let req = MilestonesRequest {
            assignment_title: "Essay".into(),
            assignment_description: "Write 10 pages".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "assignmentTitle": "Essay",
                "assignmentDescription": "Write 10 pages"
            })
        );
    }

    #[test]
    fn function_paths() {
        assert_eq!(path(GENERATE_MILESTONES), "/functions/v1/generate-milestones");
    }

    #[test]
    fn reply_tolerates_missing_and_null_eta() {
        let reply: MilestonesReply = serde_json::from_str(
            r#"{"milestones":[{"text":"Research","eta":null},{"text":"Draft"},{"text":"Edit","eta":2.5}]}"#,
        )
        .unwrap();
        let etas: Vec<Option<f64>> = reply.milestones.iter().map(|m| m.eta).collect();
        assert_eq!(etas, vec![None, None, Some(2.5)]);
    }

    #[test]
    fn reply_items_of_the_wrong_type_still_decode() {
        let reply: MilestonesReply = serde_json::from_str(
            r#"{"milestones":[
                {"text":"Research","eta":"2"},
                {"text":null,"eta":1},
                {"text":"Edit","eta":"soon"},
                {"text":"Cite","eta":[3]}
            ]}"#,
        )
        .unwrap();
        let items: Vec<(&str, Option<f64>)> = reply
            .milestones
            .iter()
            .map(|m| (m.text.as_str(), m.eta))
            .collect();
        assert_eq!(
            items,
            vec![("Research", Some(2.0)), ("", Some(1.0)), ("Edit", None), ("Cite", None)]
        );
    }
}
