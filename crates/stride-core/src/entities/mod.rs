//! Entity structs for all Stride domain objects.
//!
//! Each entity maps to a table in the libSQL database (see `stride-db`
//! migrations). All structs derive `Serialize`, `Deserialize`, and `JsonSchema`
//! for JSON roundtrip and schema validation.

mod analysis;
mod assignment;
mod group_project;
mod task;

pub use analysis::{ProfessorAnalysis, StudyResource};
pub use assignment::Assignment;
pub use group_project::{BranchUpdate, GroupProject, GroupTask, Member, MAIN_BRANCH};
pub use task::Task;
