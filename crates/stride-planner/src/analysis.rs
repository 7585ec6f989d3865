//! Completing a pending professor analysis.

use stride_core::entities::{Assignment, ProfessorAnalysis};
use stride_core::errors::CoreError;
use stride_core::identity::UserSession;

use crate::error::{GenerationError, PlannerError};
use crate::generate::{MilestoneGenerator, ProfessorAnalyzer, Summarizer};
use crate::planner::Planner;
use crate::store::AssignmentStore;

const ANALYZE_PROFESSOR: &str = "analyzeProfessor";

impl<S, M, Z> Planner<S, M, Z>
where
    S: AssignmentStore,
    M: MilestoneGenerator,
    Z: Summarizer,
{
    /// Run the analyzer for the assignment's professor and store the result.
    ///
    /// An analysis that is already complete is returned as is.
    ///
    /// # Errors
    ///
    /// - `PlannerError::Unauthenticated` without a signed-in user.
    /// - `PlannerError::Core` when the assignment names no professor.
    /// - `PlannerError::Generation` when the analyzer fails or returns no rating.
    /// - `PlannerError::Persistence` if the write fails. Local state is unchanged.
    pub async fn analyze_professor<A: ProfessorAnalyzer>(
        &self,
        session: &UserSession,
        analyzer: &A,
        assignment: &mut Assignment,
    ) -> Result<ProfessorAnalysis, PlannerError> {
        if !session.is_authenticated() {
            return Err(PlannerError::Unauthenticated);
        }
        let Some(current) = assignment.professor_analysis.as_ref() else {
            return Err(CoreError::Validation(format!(
                "assignment {} has no professor to analyse",
                assignment.id
            ))
            .into());
        };
        if current.is_complete() {
            return Ok(current.clone());
        }

        let mut analysis = analyzer.analyze(&current.name, &assignment.course).await?;
        if !analysis.is_complete() {
            return Err(GenerationError::malformed(ANALYZE_PROFESSOR, "analysis has no rating").into());
        }
        if analysis.name.trim().is_empty() {
            analysis.name.clone_from(&current.name);
        }

        self.store()
            .save_professor_analysis(&assignment.id, &analysis)
            .await?;
        tracing::info!(
            assignment_id = %assignment.id,
            professor = %analysis.name,
            rating = analysis.rating,
            "professor analysis stored"
        );
        assignment.professor_analysis = Some(analysis.clone());
        Ok(analysis)
    }
}
