//! # stride-core
//!
//! Core types, ID generation, and error types for Stride.
//!
//! This crate provides the foundational types shared across all Stride crates:
//! - Entity structs for assignments, milestone tasks, and group projects
//! - The workflow state enum with its transition table
//! - ID prefix constants and random ID generation
//! - The milestone set builder and the progress calculator
//! - Pure assignment and group project mutations
//! - Course roster import
//! - Request/reply payloads of the generation functions

pub mod aggregate;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod functions;
pub mod group;
pub mod identity;
pub mod ids;
pub mod milestones;
pub mod progress;
pub mod roster;
