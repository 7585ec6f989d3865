use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ProfessorAnalysis, Task};
use crate::enums::AssignmentSource;

/// An individually owned piece of coursework and its milestone tasks.
///
/// The assignment exclusively owns its task list; the order of `tasks` is
/// insertion order. There is no stored total estimate: see
/// [`Assignment::total_estimate`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Assignment {
    pub id: String,
    pub title: String,
    pub course: String,
    pub due_date: Option<NaiveDate>,
    pub description: String,
    /// One-sentence AI summary of the description.
    pub ai_summary: Option<String>,
    pub professor_analysis: Option<ProfessorAnalysis>,
    /// The description the current task set was generated from, if it was generated.
    pub planned_description: Option<String>,
    #[serde(default)]
    pub source: AssignmentSource,
    #[serde(default)]
    pub tasks: Vec<Task>,
}
