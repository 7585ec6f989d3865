//! In-memory collaborators for planner tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::collections::{HashMap, HashSet, VecDeque};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use stride_core::entities::{Assignment, ProfessorAnalysis, Task};
    use stride_core::enums::AssignmentSource;
    use stride_core::functions::{
        GENERATE_MILESTONES, GeneratedMilestone, MilestonesRequest, SUMMARIZE_DESCRIPTION,
        SummaryRequest,
    };
    use stride_core::identity::UserSession;

    use crate::error::{GenerationError, PersistenceError};
    use crate::generate::{MilestoneGenerator, ProfessorAnalyzer, Summarizer};
    use crate::store::AssignmentStore;

    pub fn session() -> UserSession {
        UserSession::new("user-1")
    }

    pub fn essay(id: &str) -> Assignment {
        Assignment {
            id: id.into(),
            title: "Essay".into(),
            course: "ENG 101".into(),
            due_date: None,
            description: "Write 10 pages".into(),
            ai_summary: None,
            professor_analysis: None,
            planned_description: None,
            source: AssignmentSource::Manual,
            tasks: Vec::new(),
        }
    }

    pub fn outline_and_draft() -> Vec<GeneratedMilestone> {
        vec![
            GeneratedMilestone::new("Outline", Some(2.0)),
            GeneratedMilestone::new("Draft", Some(5.0)),
        ]
    }

    /// Store backed by a map, with per-operation failure injection.
    #[derive(Default)]
    pub struct MemoryStore {
        assignments: Mutex<HashMap<String, Assignment>>,
        failing: Mutex<HashSet<&'static str>>,
        writes: AtomicUsize,
    }

    impl MemoryStore {
        pub fn with(assignments: impl IntoIterator<Item = Assignment>) -> Self {
            let store = Self::default();
            store
                .assignments
                .lock()
                .unwrap()
                .extend(assignments.into_iter().map(|a| (a.id.clone(), a)));
            store
        }

        /// Make every later call of `op` fail.
        pub fn fail(&self, op: &'static str) {
            self.failing.lock().unwrap().insert(op);
        }

        pub fn snapshot(&self, id: &str) -> Assignment {
            self.assignments.lock().unwrap()[id].clone()
        }

        /// Number of successful writes.
        pub fn writes(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }

        fn check(&self, op: &'static str) -> Result<(), PersistenceError> {
            if self.failing.lock().unwrap().contains(op) {
                return Err(PersistenceError::backend(op, "injected failure"));
            }
            Ok(())
        }

        fn write<T>(
            &self,
            op: &'static str,
            assignment_id: &str,
            f: impl FnOnce(&mut Assignment) -> Result<T, PersistenceError>,
        ) -> Result<T, PersistenceError> {
            self.check(op)?;
            let mut map = self.assignments.lock().unwrap();
            let assignment = map.get_mut(assignment_id).ok_or_else(|| PersistenceError::NotFound {
                entity: "assignment".into(),
                id: assignment_id.into(),
            })?;
            let out = f(assignment)?;
            self.writes.fetch_add(1, Ordering::SeqCst);
            Ok(out)
        }
    }

    fn task_mut<'a>(a: &'a mut Assignment, task_id: &str) -> Result<&'a mut Task, PersistenceError> {
        a.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| PersistenceError::NotFound {
                entity: "task".into(),
                id: task_id.into(),
            })
    }

    impl AssignmentStore for MemoryStore {
        async fn load_assignment(&self, assignment_id: &str) -> Result<Assignment, PersistenceError> {
            self.check("load_assignment")?;
            self.assignments
                .lock()
                .unwrap()
                .get(assignment_id)
                .cloned()
                .ok_or_else(|| PersistenceError::NotFound {
                    entity: "assignment".into(),
                    id: assignment_id.into(),
                })
        }

        async fn tasks_for(&self, assignment_id: &str) -> Result<Vec<Task>, PersistenceError> {
            Ok(self.load_assignment(assignment_id).await?.tasks)
        }

        async fn commit_plan(
            &self,
            _session: &UserSession,
            planned: &Assignment,
            replace: bool,
        ) -> Result<(), PersistenceError> {
            self.write("commit_plan", &planned.id, |a| {
                if !replace && !a.tasks.is_empty() {
                    return Err(PersistenceError::Conflict {
                        assignment_id: planned.id.clone(),
                    });
                }
                a.tasks.clone_from(&planned.tasks);
                a.ai_summary.clone_from(&planned.ai_summary);
                a.planned_description.clone_from(&planned.planned_description);
                Ok(())
            })
        }

        async fn insert_task(
            &self,
            _session: &UserSession,
            assignment_id: &str,
            task: &Task,
        ) -> Result<(), PersistenceError> {
            self.write("insert_task", assignment_id, |a| {
                a.tasks.push(task.clone());
                Ok(())
            })
        }

        async fn update_task_text(
            &self,
            assignment_id: &str,
            task_id: &str,
            text: &str,
        ) -> Result<(), PersistenceError> {
            self.write("update_task_text", assignment_id, |a| {
                task_mut(a, task_id)?.text = text.to_string();
                Ok(())
            })
        }

        async fn set_task_completed(
            &self,
            assignment_id: &str,
            task_id: &str,
            completed: bool,
        ) -> Result<(), PersistenceError> {
            self.write("set_task_completed", assignment_id, |a| {
                task_mut(a, task_id)?.completed = completed;
                Ok(())
            })
        }

        async fn delete_task(&self, assignment_id: &str, task_id: &str) -> Result<(), PersistenceError> {
            self.write("delete_task", assignment_id, |a| {
                a.tasks.retain(|t| t.id != task_id);
                Ok(())
            })
        }

        async fn save_professor_analysis(
            &self,
            assignment_id: &str,
            analysis: &ProfessorAnalysis,
        ) -> Result<(), PersistenceError> {
            self.write("save_professor_analysis", assignment_id, |a| {
                a.professor_analysis = Some(analysis.clone());
                Ok(())
            })
        }
    }

    /// Scripted replies: each call takes the next one, the last one repeats.
    struct Script<T> {
        replies: Mutex<VecDeque<Result<T, String>>>,
        delay: Duration,
        calls: Arc<AtomicUsize>,
    }

    impl<T: Clone> Script<T> {
        fn new(replies: Vec<Result<T, String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        async fn next(&self, endpoint: &str) -> Result<T, GenerationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            let reply = {
                let mut replies = self.replies.lock().unwrap();
                if replies.len() > 1 {
                    replies.pop_front().unwrap()
                } else {
                    replies.front().cloned().unwrap()
                }
            };
            reply.map_err(|message| GenerationError::Remote {
                endpoint: endpoint.to_string(),
                message,
            })
        }
    }

    pub struct StubMilestones(Script<Vec<GeneratedMilestone>>);

    impl StubMilestones {
        pub fn replying(replies: Vec<Result<Vec<GeneratedMilestone>, String>>) -> Self {
            Self(Script::new(replies))
        }

        pub fn ok(milestones: Vec<GeneratedMilestone>) -> Self {
            Self::replying(vec![Ok(milestones)])
        }

        pub fn failing(message: &str) -> Self {
            Self::replying(vec![Err(message.to_string())])
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.0.delay = delay;
            self
        }

        pub fn calls(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.0.calls)
        }
    }

    impl MilestoneGenerator for StubMilestones {
        async fn generate_milestones(
            &self,
            _request: &MilestonesRequest,
        ) -> Result<Vec<GeneratedMilestone>, GenerationError> {
            self.0.next(GENERATE_MILESTONES).await
        }
    }

    pub struct StubSummarizer(Script<String>);

    impl StubSummarizer {
        pub fn ok(summary: &str) -> Self {
            Self(Script::new(vec![Ok(summary.to_string())]))
        }

        pub fn failing(message: &str) -> Self {
            Self(Script::new(vec![Err(message.to_string())]))
        }

        pub fn calls(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.0.calls)
        }
    }

    impl Summarizer for StubSummarizer {
        async fn summarize(&self, _request: &SummaryRequest) -> Result<String, GenerationError> {
            self.0.next(SUMMARIZE_DESCRIPTION).await
        }
    }

    /// Analyzer with one fixed reply.
    pub struct StubAnalyzer(Script<ProfessorAnalysis>);

    impl StubAnalyzer {
        pub fn ok(analysis: ProfessorAnalysis) -> Self {
            Self(Script::new(vec![Ok(analysis)]))
        }

        pub fn failing(message: &str) -> Self {
            Self(Script::new(vec![Err(message.to_string())]))
        }

        pub fn calls(&self) -> Arc<AtomicUsize> {
            Arc::clone(&self.0.calls)
        }
    }

    impl ProfessorAnalyzer for StubAnalyzer {
        async fn analyze(
            &self,
            _professor: &str,
            _course: &str,
        ) -> Result<ProfessorAnalysis, GenerationError> {
            self.0.next("analyzeProfessor").await
        }
    }
}
