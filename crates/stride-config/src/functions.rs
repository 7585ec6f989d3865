//! Generation functions endpoint configuration (client side).

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "http://127.0.0.1:8787".to_string()
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FunctionsConfig {
    /// Base URL the `/functions/v1/...` paths are appended to.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Bearer key sent with every call. Optional for a local service.
    #[serde(default)]
    pub api_key: String,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for FunctionsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FunctionsConfig {
    pub fn is_configured(&self) -> bool {
        !self.base_url.is_empty()
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_service() {
        let config = FunctionsConfig::default();
        assert!(config.is_configured());
        assert!(!config.has_api_key());
        assert_eq!(config.timeout_secs, 60);
    }
}
