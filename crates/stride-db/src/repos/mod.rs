//! Repositories: one `impl StrideService` block per table family.

pub mod assignment;
pub mod group;
pub mod task;
