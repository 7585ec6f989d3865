//! Milestone generation policy.

use serde::{Deserialize, Serialize};

const fn default_allow_retry_after_failure() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlannerConfig {
    /// Whether an assignment whose last generation failed may be generated again.
    #[serde(default = "default_allow_retry_after_failure")]
    pub allow_retry_after_failure: bool,

    /// Whether editing the description of a generated plan triggers a new plan.
    #[serde(default)]
    pub regenerate_on_description_change: bool,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            allow_retry_after_failure: default_allow_retry_after_failure(),
            regenerate_on_description_change: false,
        }
    }
}
