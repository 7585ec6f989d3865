//! The generation collaborators.

use std::future::Future;

use stride_core::entities::ProfessorAnalysis;
use stride_core::functions::{GeneratedMilestone, MilestonesRequest, SummaryRequest};

use crate::error::GenerationError;

/// Produces a milestone breakdown for an assignment.
pub trait MilestoneGenerator: Send + Sync {
    fn generate_milestones(
        &self,
        request: &MilestonesRequest,
    ) -> impl Future<Output = Result<Vec<GeneratedMilestone>, GenerationError>> + Send;
}

/// Produces a one-sentence summary of a description.
pub trait Summarizer: Send + Sync {
    fn summarize(
        &self,
        request: &SummaryRequest,
    ) -> impl Future<Output = Result<String, GenerationError>> + Send;
}

/// Reads a professor's public profile into an analysis for one course.
pub trait ProfessorAnalyzer: Send + Sync {
    fn analyze(
        &self,
        professor: &str,
        course: &str,
    ) -> impl Future<Output = Result<ProfessorAnalysis, GenerationError>> + Send;
}
