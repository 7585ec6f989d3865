//! The generation workflow.
//!
//! `open` runs one activation for an assignment:
//!
//! ```text
//! idle → checking ─┬─ tasks exist ──→ has_existing_tasks → ready
//!                  └─ no tasks ─────→ generating ─┬─ both calls ok, plan committed → ready
//!                                                 └─ any failure → failed
//! ```
//!
//! Both generation calls are joined before anything is written, and the plan
//! is written with one atomic `commit_plan`, so a failure or a cancelled
//! activation leaves the store untouched.

use stride_core::entities::Assignment;
use stride_core::enums::WorkflowState;
use stride_core::functions::{
    GENERATE_MILESTONES, MilestonesRequest, SUMMARIZE_DESCRIPTION, SummaryRequest,
};
use stride_core::identity::UserSession;
use stride_core::milestones;

use crate::error::{GenerationError, PlannerError};
use crate::generate::{MilestoneGenerator, Summarizer};
use crate::guard::Registry;
use crate::policy::GenerationPolicy;
use crate::store::AssignmentStore;
use crate::workflow::Activation;

/// Result of opening an assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    /// No signed-in user or no assignment ID. Nothing was read.
    Idle,
    /// Another activation for the same assignment is running.
    Suppressed,
    /// The assignment with its tasks and summary.
    Ready {
        assignment: Assignment,
        /// Whether this activation generated and stored the plan.
        generated: bool,
        trace: Vec<WorkflowState>,
    },
}

/// Drives milestone generation and persisted edits for assignments.
pub struct Planner<S, M, Z> {
    store: S,
    milestones: M,
    summarizer: Z,
    policy: GenerationPolicy,
    registry: Registry,
}

impl<S, M, Z> Planner<S, M, Z>
where
    S: AssignmentStore,
    M: MilestoneGenerator,
    Z: Summarizer,
{
    pub fn new(store: S, milestones: M, summarizer: Z) -> Self {
        Self::with_policy(store, milestones, summarizer, GenerationPolicy::default())
    }

    pub fn with_policy(store: S, milestones: M, summarizer: Z, policy: GenerationPolicy) -> Self {
        Self {
            store,
            milestones,
            summarizer,
            policy,
            registry: Registry::default(),
        }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    pub const fn policy(&self) -> GenerationPolicy {
        self.policy
    }

    /// Last recorded workflow state for an assignment in this planner.
    pub fn state(&self, assignment_id: &str) -> Option<WorkflowState> {
        self.registry.state(assignment_id)
    }

    /// Run the workflow for an assignment detail view being opened.
    ///
    /// # Errors
    ///
    /// - `PlannerError::RetryNotAllowed` if the last activation failed and the
    ///   policy forbids retrying.
    /// - `PlannerError::Persistence` if the store read or the plan write fails.
    /// - `PlannerError::Generation` if either generation call fails or returns
    ///   nothing usable.
    pub async fn open(
        &self,
        session: Option<&UserSession>,
        assignment_id: &str,
    ) -> Result<PlanOutcome, PlannerError> {
        let Some(session) = session.filter(|s| s.is_authenticated()) else {
            tracing::debug!(assignment_id, "no signed-in user, staying idle");
            return Ok(PlanOutcome::Idle);
        };
        if assignment_id.trim().is_empty() {
            return Ok(PlanOutcome::Idle);
        }
        if !self.policy.allow_retry_after_failure
            && self.state(assignment_id) == Some(WorkflowState::Failed)
        {
            return Err(PlannerError::RetryNotAllowed {
                assignment_id: assignment_id.to_string(),
            });
        }

        let Some(_claim) = self.registry.try_claim(assignment_id) else {
            tracing::debug!(assignment_id, "activation already running, suppressed");
            return Ok(PlanOutcome::Suppressed);
        };
        self.activate(session, assignment_id).await
    }

    /// Re-run the workflow after a failed activation.
    ///
    /// # Errors
    ///
    /// `PlannerError::RetryNotAllowed` when the policy forbids retrying,
    /// otherwise the errors of [`Self::open`].
    pub async fn retry(
        &self,
        session: Option<&UserSession>,
        assignment_id: &str,
    ) -> Result<PlanOutcome, PlannerError> {
        if !self.policy.allow_retry_after_failure {
            return Err(PlannerError::RetryNotAllowed {
                assignment_id: assignment_id.to_string(),
            });
        }
        self.open(session, assignment_id).await
    }

    fn step(&self, activation: &mut Activation, next: WorkflowState) -> Result<(), PlannerError> {
        activation.advance(next)?;
        self.registry.record(activation.assignment_id(), next);
        Ok(())
    }

    async fn activate(
        &self,
        session: &UserSession,
        assignment_id: &str,
    ) -> Result<PlanOutcome, PlannerError> {
        let mut activation = Activation::start(assignment_id);
        self.step(&mut activation, WorkflowState::Checking)?;

        let assignment = match self.store.load_assignment(assignment_id).await {
            Ok(assignment) => assignment,
            Err(e) => {
                tracing::error!(assignment_id, error = %e, "could not read assignment");
                self.step(&mut activation, WorkflowState::Idle)?;
                return Err(e.into());
            }
        };

        let replace =
            self.policy.regenerate_on_description_change && assignment.needs_regeneration();
        if !assignment.tasks.is_empty() && !replace {
            self.step(&mut activation, WorkflowState::HasExistingTasks)?;
            self.step(&mut activation, WorkflowState::Ready)?;
            return Ok(PlanOutcome::Ready {
                assignment,
                generated: false,
                trace: activation.trace().to_vec(),
            });
        }

        self.step(&mut activation, WorkflowState::Generating)?;
        match self.generate(session, &assignment, replace).await {
            Ok(planned) => {
                self.step(&mut activation, WorkflowState::Ready)?;
                Ok(PlanOutcome::Ready {
                    assignment: planned,
                    generated: true,
                    trace: activation.trace().to_vec(),
                })
            }
            Err(e) => {
                tracing::error!(assignment_id, error = %e, "milestone generation failed");
                self.step(&mut activation, WorkflowState::Failed)?;
                Err(e)
            }
        }
    }

    async fn generate(
        &self,
        session: &UserSession,
        assignment: &Assignment,
        replace: bool,
    ) -> Result<Assignment, PlannerError> {
        let milestones_request = MilestonesRequest {
            assignment_title: assignment.title.clone(),
            assignment_description: assignment.description.clone(),
        };
        let summary_request = SummaryRequest {
            description: assignment.description.clone(),
        };

        let (generated, summary) = tokio::try_join!(
            self.milestones.generate_milestones(&milestones_request),
            self.summarizer.summarize(&summary_request),
        )?;

        let plan = milestones::from_generated(generated)?;
        if plan.is_empty() {
            return Err(GenerationError::malformed(GENERATE_MILESTONES, "no usable milestones").into());
        }
        let summary = summary.trim();
        if summary.is_empty() {
            return Err(GenerationError::malformed(SUMMARIZE_DESCRIPTION, "empty summary").into());
        }

        let planned = assignment.with_plan(plan, summary);
        self.store.commit_plan(session, &planned, replace).await?;
        tracing::info!(
            assignment_id = %planned.id,
            tasks = planned.tasks.len(),
            total_estimate = planned.total_estimate(),
            replaced = replace,
            "plan committed"
        );
        Ok(planned)
    }
}
