//! # stride-schema
//!
//! JSON Schema registry and boundary validation for Stride.
//!
//! Entity and payload types are defined in `stride-core` with
//! `#[derive(JsonSchema)]`. This crate collects their schemas by name and
//! validates untrusted JSON (model output, function replies) before it is
//! decoded into typed values. Consumers: `stride-gen`, `stride-functions`, `stride-db`.

mod error;
mod registry;

pub use error::SchemaError;
pub use registry::{SchemaRegistry, names};
