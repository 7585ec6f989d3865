use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A link the analysis recommends, such as a department writing guide.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct StudyResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// AI-derived read on the course professor's expectations for an assignment.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ProfessorAnalysis {
    pub name: String,
    pub personality: String,
    /// Compliance rating, 0-100. Zero means the analysis has not run yet.
    pub rating: u8,
    #[serde(default)]
    pub tips: Vec<String>,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub weaknesses: Vec<String>,
    #[serde(default)]
    pub resources: Vec<StudyResource>,
}

impl ProfessorAnalysis {
    /// Placeholder analysis for a professor that has not been analysed yet.
    #[must_use]
    pub fn pending(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            personality: "Analysis pending...".to_string(),
            ..Self::default()
        }
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.rating > 0
    }
}
