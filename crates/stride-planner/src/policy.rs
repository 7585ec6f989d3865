//! When the workflow may call the generators again.

use stride_config::PlannerConfig;

/// Regeneration rules. The default generates once per assignment and lets
/// the student retry after a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationPolicy {
    /// An assignment whose last activation ended `failed` may generate again.
    pub allow_retry_after_failure: bool,
    /// A generated plan whose source description was since edited is replaced.
    pub regenerate_on_description_change: bool,
}

impl Default for GenerationPolicy {
    fn default() -> Self {
        Self {
            allow_retry_after_failure: true,
            regenerate_on_description_change: false,
        }
    }
}

impl From<&PlannerConfig> for GenerationPolicy {
    fn from(config: &PlannerConfig) -> Self {
        Self {
            allow_retry_after_failure: config.allow_retry_after_failure,
            regenerate_on_description_change: config.regenerate_on_description_change,
        }
    }
}
