//! Configuration error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file or `STRIDE_*` variable could not be read into the sections.
    #[error("failed to load Stride configuration: {0}")]
    Figment(#[from] figment::Error),

    /// A section needed by the running component has no usable values.
    #[error("[{section}] is not configured; set it in config.toml or as STRIDE_{}__* variables", .section.to_uppercase())]
    NotConfigured { section: String },

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}
