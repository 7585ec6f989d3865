//! # stride-config
//!
//! Layered configuration loading for Stride using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`STRIDE_*` prefix, `__` as separator)
//! 2. Project-level `.stride/config.toml`
//! 3. User-level `~/.config/stride/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `STRIDE_GEMINI__API_KEY` -> `gemini.api_key`,
//! `STRIDE_PLANNER__ALLOW_RETRY_AFTER_FAILURE` -> `planner.allow_retry_after_failure`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use stride_config::StrideConfig;
//!
//! let config = StrideConfig::load_with_dotenv().expect("config");
//! if config.database.is_remote() {
//!     println!("database: {}", config.database.url);
//! }
//! ```

mod database;
mod error;
mod functions;
mod gemini;
mod planner;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use functions::FunctionsConfig;
pub use gemini::GeminiConfig;
pub use planner::PlannerConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StrideConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub functions: FunctionsConfig,
    #[serde(default)]
    pub gemini: GeminiConfig,
    #[serde(default)]
    pub planner: PlannerConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl StrideConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`. Use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` if a source cannot be parsed, or
    /// `ConfigError::InvalidValue` if a loaded value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading a `.env` file, if one is found.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".stride/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("STRIDE_").split("__"))
    }

    /// Reject values that extract cleanly but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.functions.timeout_secs == 0 {
            return Err(invalid("functions.timeout_secs", "must be greater than zero"));
        }
        if self.gemini.timeout_secs == 0 {
            return Err(invalid("gemini.timeout_secs", "must be greater than zero"));
        }
        if !self.database.url.is_empty() && !self.database.has_valid_url() {
            return Err(invalid(
                "database.url",
                "must start with libsql://, https:// or http://",
            ));
        }
        self.server.socket_addr()?;
        Ok(())
    }

    /// The Gemini section, if it is usable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::NotConfigured` when the API key is missing.
    pub fn require_gemini(&self) -> Result<&GeminiConfig, ConfigError> {
        if self.gemini.is_configured() {
            Ok(&self.gemini)
        } else {
            Err(ConfigError::NotConfigured {
                section: "gemini".into(),
            })
        }
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("stride").join("config.toml"))
    }

    /// Load `.env` from the workspace root, falling back to the current dir.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = StrideConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.database.is_remote());
        assert!(!config.gemini.is_configured());
        assert!(config.planner.allow_retry_after_failure);
    }

    #[test]
    fn figment_builds_without_files() {
        let config: StrideConfig = StrideConfig::figment()
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.functions.timeout_secs, 60);
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let mut config = StrideConfig::default();
        config.gemini.timeout_secs = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "gemini.timeout_secs"
        ));
    }

    #[test]
    fn require_gemini_reports_missing_section() {
        let config = StrideConfig::default();
        assert!(matches!(
            config.require_gemini(),
            Err(ConfigError::NotConfigured { .. })
        ));
    }
}
