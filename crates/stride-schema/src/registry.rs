//! Central schema registry for Stride types.
//!
//! The `SchemaRegistry` builds JSON Schemas from `stride-core` types at
//! construction time using [`schemars::schema_for!`] and validates values via
//! `jsonschema`.

use std::collections::HashMap;

use schemars::{Schema, schema_for};
use serde::de::DeserializeOwned;

use crate::error::SchemaError;

/// Registered schema names.
pub mod names {
    pub const ASSIGNMENT: &str = "assignment";
    pub const TASK: &str = "task";
    pub const PROFESSOR_ANALYSIS: &str = "professor_analysis";
    pub const GROUP_PROJECT: &str = "group_project";
    pub const GROUP_TASK: &str = "group_task";
    pub const BRANCH_UPDATE: &str = "branch_update";
    pub const ROSTER_ASSIGNMENT: &str = "roster_assignment";
    pub const PROGRESS: &str = "progress";
    pub const MILESTONES_REQUEST: &str = "milestones_request";
    pub const MILESTONES_REPLY: &str = "milestones_reply";
    pub const SUMMARY_REQUEST: &str = "summary_request";
    pub const SUMMARY_REPLY: &str = "summary_reply";
    pub const ERROR_REPLY: &str = "error_reply";
}

/// Named JSON Schemas for every entity and wire payload.
pub struct SchemaRegistry {
    schemas: HashMap<&'static str, Schema>,
}

macro_rules! register {
    ($map:expr, $name:expr, $ty:ty) => {
        $map.insert($name, schema_for!($ty));
    };
}

impl SchemaRegistry {
    #[must_use]
    pub fn new() -> Self {
        use stride_core::{entities, functions, progress, roster};

        let mut schemas = HashMap::new();

        // --- Entities ---
        register!(schemas, names::ASSIGNMENT, entities::Assignment);
        register!(schemas, names::TASK, entities::Task);
        register!(schemas, names::PROFESSOR_ANALYSIS, entities::ProfessorAnalysis);
        register!(schemas, names::GROUP_PROJECT, entities::GroupProject);
        register!(schemas, names::GROUP_TASK, entities::GroupTask);
        register!(schemas, names::BRANCH_UPDATE, entities::BranchUpdate);
        register!(schemas, names::ROSTER_ASSIGNMENT, roster::RosterAssignment);
        register!(schemas, names::PROGRESS, progress::Progress);

        // --- Generation function payloads ---
        register!(schemas, names::MILESTONES_REQUEST, functions::MilestonesRequest);
        register!(schemas, names::MILESTONES_REPLY, functions::MilestonesReply);
        register!(schemas, names::SUMMARY_REQUEST, functions::SummaryRequest);
        register!(schemas, names::SUMMARY_REPLY, functions::SummaryReply);
        register!(schemas, names::ERROR_REPLY, functions::ErrorReply);

        Self { schemas }
    }

    /// Get a schema by name. Returns `None` if not found.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&serde_json::Value> {
        self.schemas.get(name).map(Schema::as_value)
    }

    /// Validate a JSON value against a named schema.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::NotFound` if the schema name is unknown, or
    /// `SchemaError::ValidationFailed` if validation produces errors.
    pub fn validate(&self, name: &str, instance: &serde_json::Value) -> Result<(), SchemaError> {
        let schema = self
            .get(name)
            .ok_or_else(|| SchemaError::NotFound(name.to_string()))?;

        let validator = jsonschema::validator_for(schema)
            .map_err(|e| SchemaError::Generation(format!("{e}")))?;

        let errors: Vec<String> = validator
            .iter_errors(instance)
            .map(|e| format!("{e}"))
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::ValidationFailed { errors })
        }
    }

    /// Validate `instance` and decode it into `T`.
    ///
    /// Untrusted JSON must go through here rather than straight to
    /// `serde_json::from_value`, so a half-valid object never gets inward.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`Self::validate`], or `SchemaError::Decode` when
    /// the validated value still does not fit `T`.
    pub fn parse<T: DeserializeOwned>(
        &self,
        name: &str,
        instance: serde_json::Value,
    ) -> Result<T, SchemaError> {
        self.validate(name, &instance)?;
        serde_json::from_value(instance).map_err(|e| SchemaError::Decode {
            schema: name.to_string(),
            reason: e.to_string(),
        })
    }

    /// Parse `text` as JSON, then [`Self::parse`] it.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Decode` for text that is not JSON, otherwise the
    /// errors of [`Self::parse`].
    pub fn parse_str<T: DeserializeOwned>(&self, name: &str, text: &str) -> Result<T, SchemaError> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| SchemaError::Decode {
                schema: name.to_string(),
                reason: e.to_string(),
            })?;
        self.parse(name, value)
    }

    /// List all registered schema names.
    #[must_use]
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.schemas.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered schemas.
    #[must_use]
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}
