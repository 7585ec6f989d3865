use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The signed-in student on whose behalf store writes are made.
///
/// Passed explicitly into the planner instead of being read from shared
/// application state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct UserSession {
    /// Backend user ID, written to every task row.
    pub user_id: String,
    pub display_name: Option<String>,
}

impl UserSession {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
        }
    }

    /// A session is usable only when it carries a non-blank user ID.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        !self.user_id.trim().is_empty()
    }
}
