//! # stride-planner
//!
//! The milestone-generation workflow for Stride assignments.
//!
//! Opening an assignment runs one activation of the workflow: read the stored
//! tasks, and if there are none, call the milestone generator and the
//! summarizer concurrently and commit the result in a single write. Manual
//! task edits go through the same store with one write per edit.
//!
//! Storage and generation are traits so the workflow can run against libSQL
//! and the HTTP functions in production and in-memory stubs in tests.

mod analysis;
mod editor;
pub mod error;
pub mod generate;
mod guard;
pub mod planner;
pub mod policy;
pub mod store;
pub mod workflow;

mod test_support;

pub use error::{GenerationError, PersistenceError, PlannerError};
pub use generate::{MilestoneGenerator, ProfessorAnalyzer, Summarizer};
pub use planner::{PlanOutcome, Planner};
pub use policy::GenerationPolicy;
pub use store::AssignmentStore;
