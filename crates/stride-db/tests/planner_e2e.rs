//! The generation workflow running against a real libSQL store.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pretty_assertions::assert_eq;
use stride_core::entities::Assignment;
use stride_core::enums::WorkflowState;
use stride_core::functions::{
    GeneratedMilestone, MilestonesRequest, SUMMARIZE_DESCRIPTION, SummaryRequest,
};
use stride_core::identity::UserSession;
use stride_db::service::StrideService;
use stride_planner::{
    GenerationError, MilestoneGenerator, PlanOutcome, Planner, PlannerError, Summarizer,
};

struct FixedMilestones {
    delay: Duration,
    calls: AtomicUsize,
}

impl FixedMilestones {
    fn new(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
        }
    }
}

impl MilestoneGenerator for FixedMilestones {
    async fn generate_milestones(
        &self,
        request: &MilestonesRequest,
    ) -> Result<Vec<GeneratedMilestone>, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        assert_eq!(request.assignment_title, "Essay");
        Ok(vec![
            GeneratedMilestone::new("Outline", Some(2.0)),
            GeneratedMilestone::new("Draft", Some(5.0)),
        ])
    }
}

struct FixedSummary(Result<&'static str, &'static str>);

impl Summarizer for FixedSummary {
    async fn summarize(&self, request: &SummaryRequest) -> Result<String, GenerationError> {
        assert_eq!(request.description, "Write 10 pages");
        self.0
            .map(str::to_string)
            .map_err(|message| GenerationError::Remote {
                endpoint: SUMMARIZE_DESCRIPTION.to_string(),
                message: message.to_string(),
            })
    }
}

async fn service_with_essay() -> (StrideService, String) {
    let svc = StrideService::new_local(":memory:").await.unwrap();
    let essay = Assignment::new("Essay", "ENG 101", None, "Write 10 pages").unwrap();
    svc.create_assignment("user-1", &essay).await.unwrap();
    (svc, essay.id)
}

#[tokio::test]
async fn essay_is_planned_once_and_persisted() {
    let (svc, id) = service_with_essay().await;
    let planner = Planner::new(
        svc,
        FixedMilestones::new(Duration::ZERO),
        FixedSummary(Ok("Your main goal is to write a ten page essay.")),
    );
    let user = UserSession::new("user-1");

    let outcome = planner.open(Some(&user), &id).await.unwrap();
    let PlanOutcome::Ready { assignment, trace, .. } = outcome else {
        panic!("expected Ready, got {outcome:?}");
    };
    assert_eq!(trace.last(), Some(&WorkflowState::Ready));
    assert_eq!(assignment.tasks.len(), 2);

    let stored = planner.store().get_assignment(&id).await.unwrap();
    assert_eq!(stored.tasks, assignment.tasks);
    assert!((stored.total_estimate() - 7.0).abs() < f64::EPSILON);
    assert_eq!(
        stored.ai_summary.as_deref(),
        Some("Your main goal is to write a ten page essay.")
    );

    // Re-opening reads the stored plan instead of generating again.
    let outcome = planner.open(Some(&user), &id).await.unwrap();
    assert!(matches!(outcome, PlanOutcome::Ready { generated: false, .. }));
}

#[tokio::test]
async fn summary_failure_leaves_no_tasks_behind() {
    let (svc, id) = service_with_essay().await;
    let planner = Planner::new(
        svc,
        FixedMilestones::new(Duration::ZERO),
        FixedSummary(Err("model overloaded")),
    );

    let err = planner
        .open(Some(&UserSession::new("user-1")), &id)
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::Generation(_)));

    let stored = planner.store().get_assignment(&id).await.unwrap();
    assert!(stored.tasks.is_empty());
    assert_eq!(stored.ai_summary, None);
}

#[tokio::test]
async fn concurrent_opens_store_one_task_set() {
    let (svc, id) = service_with_essay().await;
    let planner = Planner::new(
        svc,
        FixedMilestones::new(Duration::from_millis(30)),
        FixedSummary(Ok("For this assignment, you'll need to write an essay.")),
    );
    let user = UserSession::new("user-1");

    let (a, b) = tokio::join!(planner.open(Some(&user), &id), planner.open(Some(&user), &id));
    let suppressed = [a.unwrap(), b.unwrap()]
        .iter()
        .filter(|o| matches!(o, PlanOutcome::Suppressed))
        .count();

    assert_eq!(suppressed, 1);
    assert_eq!(planner.store().list_tasks(&id).await.unwrap().len(), 2);
}

#[tokio::test]
async fn editor_writes_through_to_the_database() {
    let (svc, id) = service_with_essay().await;
    let planner = Planner::new(
        svc,
        FixedMilestones::new(Duration::ZERO),
        FixedSummary(Ok("Your main goal is to write.")),
    );
    let user = UserSession::new("user-1");
    let PlanOutcome::Ready { mut assignment, .. } = planner.open(Some(&user), &id).await.unwrap()
    else {
        panic!("expected Ready");
    };

    let added = planner
        .add_task(&user, &mut assignment, "Proofread", "1")
        .await
        .unwrap();
    let first = assignment.tasks[0].id.clone();
    planner.toggle_task_completed(&mut assignment, &first).await.unwrap();
    planner
        .edit_task_text(&mut assignment, &added.id, "Proofread twice")
        .await
        .unwrap();

    let stored = planner.store().get_assignment(&id).await.unwrap();
    assert_eq!(stored.tasks, assignment.tasks);
    assert_eq!(stored.tasks.last().map(|t| t.text.as_str()), Some("Proofread twice"));
    assert!((stored.progress().percent - 25.0).abs() < 1e-9);
}
