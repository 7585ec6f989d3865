//! Milestone set builder.
//!
//! Turns either one manually entered milestone or a batch of model-generated
//! milestones into [`Task`] records with fresh IDs and `completed = false`.
//!
//! Manual input is trusted to mean what it says and is rejected when malformed.
//! Generated input is untrusted: a missing or unusable estimate becomes `0`
//! and blank entries are dropped, so one bad item never aborts the batch.

use std::collections::HashSet;

use crate::entities::Task;
use crate::errors::CoreError;
use crate::functions::GeneratedMilestone;
use crate::ids::{self, PREFIX_TASK};
use crate::progress;

/// Largest hour estimate a milestone may carry. Keeps sums of estimates
/// finite, so progress is always a real percentage.
pub const MAX_ETA_HOURS: f64 = 10_000.0;

/// An ordered list of freshly built tasks.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MilestoneSet {
    tasks: Vec<Task>,
}

impl MilestoneSet {
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    #[must_use]
    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Sum of all task estimates, recomputed from the tasks.
    #[must_use]
    pub fn total_estimate(&self) -> f64 {
        progress::total_estimate(&self.tasks)
    }
}

/// Build tasks from a generated milestone list.
///
/// # Errors
///
/// Returns `CoreError::IdGeneration` if IDs cannot be drawn. Malformed items
/// never cause an error.
pub fn from_generated(items: Vec<GeneratedMilestone>) -> Result<MilestoneSet, CoreError> {
    let mut taken: HashSet<String> = HashSet::with_capacity(items.len());
    let mut tasks = Vec::with_capacity(items.len());

    for (index, item) in items.into_iter().enumerate() {
        let text = item.text.trim();
        if text.is_empty() {
            tracing::warn!(index, "dropping generated milestone with blank text");
            continue;
        }
        let eta = match item.eta {
            Some(eta) if (0.0..=MAX_ETA_HOURS).contains(&eta) => eta,
            Some(eta) => {
                tracing::warn!(index, eta, "generated milestone has unusable eta, using 0");
                0.0
            }
            None => {
                tracing::warn!(index, "generated milestone has no eta, using 0");
                0.0
            }
        };
        let id = ids::generate_unique(PREFIX_TASK, |candidate| taken.contains(candidate))?;
        taken.insert(id.clone());
        tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
            eta,
        });
    }

    Ok(MilestoneSet { tasks })
}

/// Build one task from form input, with an ID not used by `existing`.
///
/// `eta` is the raw text of the estimate field.
///
/// # Errors
///
/// Returns `CoreError::Validation` if the text is blank or the estimate is not
/// a finite, non-negative number.
pub fn manual_task(text: &str, eta: &str, existing: &[Task]) -> Result<Task, CoreError> {
    let text = validate_text(text)?;
    let eta = parse_eta(eta)?;
    let id = ids::generate_unique(PREFIX_TASK, |candidate| {
        existing.iter().any(|t| t.id == candidate)
    })?;
    Ok(Task {
        id,
        text,
        completed: false,
        eta,
    })
}

/// Parse a user-entered hour estimate.
///
/// # Errors
///
/// Returns `CoreError::Validation` for empty, non-numeric, non-finite, or
/// negative input, or for more than [`MAX_ETA_HOURS`].
pub fn parse_eta(raw: &str) -> Result<f64, CoreError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(CoreError::Validation("estimate is required".into()));
    }
    let eta: f64 = raw
        .parse()
        .map_err(|_| CoreError::Validation(format!("estimate '{raw}' is not a number")))?;
    if !eta.is_finite() {
        return Err(CoreError::Validation(format!("estimate '{raw}' is not a number")));
    }
    if eta < 0.0 {
        return Err(CoreError::Validation(format!("estimate must not be negative, got {eta}")));
    }
    if eta > MAX_ETA_HOURS {
        return Err(CoreError::Validation(format!(
            "estimate must be at most {MAX_ETA_HOURS} hours, got {eta}"
        )));
    }
    Ok(eta)
}

/// Trim milestone text and reject it when nothing is left.
///
/// # Errors
///
/// Returns `CoreError::Validation` for blank text.
pub fn validate_text(text: &str) -> Result<String, CoreError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(CoreError::Validation("milestone text is required".into()));
    }
    Ok(text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn missing_eta_defaults_to_zero_without_rejecting_batch() {
        let set = from_generated(vec![
            GeneratedMilestone::new("Research", None),
            GeneratedMilestone::new("Draft", Some(3.0)),
        ])
        .unwrap();

        let etas: Vec<f64> = set.tasks().iter().map(|t| t.eta).collect();
        assert_eq!(etas, vec![0.0, 3.0]);
        assert_eq!(set.total_estimate(), 3.0);
        assert!(set.tasks().iter().all(|t| !t.completed));
    }

    #[test]
    fn generated_ids_are_unique_and_prefixed() {
        let items = (0..50)
            .map(|i| GeneratedMilestone::new(format!("Step {i}"), Some(1.0)))
            .collect();
        let set = from_generated(items).unwrap();
        let ids: HashSet<&str> = set.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), 50);
        assert!(ids.iter().all(|id| id.starts_with("tsk-")));
    }

    #[test]
    fn blank_and_negative_generated_items_are_normalised() {
        let set = from_generated(vec![
            GeneratedMilestone::new("   ", Some(4.0)),
            GeneratedMilestone::new(" Outline ", Some(-2.0)),
            GeneratedMilestone::new("Polish", Some(f64::INFINITY)),
        ])
        .unwrap();
        let tasks: Vec<(&str, f64)> = set.tasks().iter().map(|t| (t.text.as_str(), t.eta)).collect();
        assert_eq!(tasks, vec![("Outline", 0.0), ("Polish", 0.0)]);
    }

    #[test]
    fn oversized_generated_eta_becomes_zero() {
        let set = from_generated(vec![
            GeneratedMilestone::new("Read everything", Some(f64::MAX)),
            GeneratedMilestone::new("Draft", Some(MAX_ETA_HOURS)),
        ])
        .unwrap();
        let etas: Vec<f64> = set.tasks().iter().map(|t| t.eta).collect();
        assert_eq!(etas, vec![0.0, MAX_ETA_HOURS]);
        assert!(set.total_estimate().is_finite());
    }

    #[test]
    fn empty_manual_text_is_rejected() {
        let err = manual_task("", "2", &[]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)));
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("-1")]
    #[case("NaN")]
    #[case("inf")]
    #[case("1e308")]
    #[case("10000.5")]
    fn bad_manual_eta_is_rejected(#[case] eta: &str) {
        let err = manual_task("Write intro", eta, &[]).unwrap_err();
        assert!(matches!(err, CoreError::Validation(_)), "{eta}");
    }

    #[test]
    fn manual_task_parses_eta_and_trims_text() {
        let task = manual_task("  Write intro ", " 1.5 ", &[]).unwrap();
        assert_eq!(task.text, "Write intro");
        assert_eq!(task.eta, 1.5);
        assert!(!task.completed);
    }
}
