use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::progress::Estimated;

/// One milestone of an assignment: a unit of estimated work.
///
/// IDs are unique within the owning assignment only.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Task {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Estimated hours of work. Never negative.
    pub eta: f64,
}

impl Estimated for Task {
    fn eta(&self) -> f64 {
        self.eta
    }

    fn is_completed(&self) -> bool {
        self.completed
    }
}
