//! Persistence configuration: a local libSQL file or a hosted Turso database.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    ".stride/stride.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file, used when no remote URL is set.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote database URL (e.g., `libsql://stride-dev.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
        }
    }
}

impl DatabaseConfig {
    /// Whether remote access has the minimum required fields.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Whether the remote URL has a scheme libSQL understands.
    pub fn has_valid_url(&self) -> bool {
        ["libsql://", "https://", "http://"]
            .iter()
            .any(|scheme| self.url.starts_with(scheme))
    }
}
