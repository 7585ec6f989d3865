//! Course roster import.
//!
//! Assignments pulled from a course-management system arrive without tasks.
//! They stay unplanned until the generation workflow (or the student) fills
//! them in.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::entities::{Assignment, ProfessorAnalysis};
use crate::enums::AssignmentSource;

/// One assignment as listed by the course roster.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RosterAssignment {
    /// ID in the roster system. Reused as the assignment ID so repeated
    /// imports are recognised.
    pub external_id: String,
    pub course_name: String,
    pub professor: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub due_at: DateTime<Utc>,
}

impl RosterAssignment {
    #[must_use]
    pub fn into_assignment(self) -> Assignment {
        Assignment {
            id: self.external_id,
            title: self.title,
            course: self.course_name,
            due_date: Some(self.due_at.date_naive()),
            description: self.description,
            ai_summary: None,
            professor_analysis: Some(ProfessorAnalysis::pending(self.professor)),
            planned_description: None,
            source: AssignmentSource::Roster,
            tasks: Vec::new(),
        }
    }
}

/// Append imported assignments whose IDs are not already present.
///
/// Returns the number of assignments added.
pub fn merge_roster(existing: &mut Vec<Assignment>, incoming: Vec<RosterAssignment>) -> usize {
    let mut seen: HashSet<String> = existing.iter().map(|a| a.id.clone()).collect();
    let before = existing.len();
    for item in incoming {
        if seen.insert(item.external_id.clone()) {
            existing.push(item.into_assignment());
        } else {
            tracing::debug!(id = %item.external_id, "roster assignment already imported");
        }
    }
    existing.len() - before
}

/// Split assignments into `(unplanned, in_progress)` for the dashboard.
#[must_use]
pub fn partition_by_planning(assignments: &[Assignment]) -> (Vec<&Assignment>, Vec<&Assignment>) {
    assignments.iter().partition(|a| a.is_unplanned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Task;
    use chrono::{NaiveDate, TimeZone};
    use pretty_assertions::assert_eq;

    fn civil_war_essay() -> RosterAssignment {
        RosterAssignment {
            external_id: "canvas_a_1".into(),
            course_name: "HIST221 - American History".into(),
            professor: "Dr. Eleanor Vance".into(),
            title: "Civil War Essay".into(),
            description: "A 10-page research paper.".into(),
            due_at: Utc.with_ymd_and_hms(2025, 11, 20, 23, 59, 0).unwrap(),
        }
    }

    #[test]
    fn imported_assignment_is_unplanned_with_pending_analysis() {
        let a = civil_war_essay().into_assignment();
        assert_eq!(a.id, "canvas_a_1");
        assert_eq!(a.due_date, NaiveDate::from_ymd_opt(2025, 11, 20));
        assert_eq!(a.source, AssignmentSource::Roster);
        assert!(a.tasks.is_empty());
        assert!(a.is_unplanned());

        let analysis = a.professor_analysis.unwrap();
        assert_eq!(analysis.name, "Dr. Eleanor Vance");
        assert!(!analysis.is_complete());
    }

    #[test]
    fn merge_skips_known_ids() {
        let mut existing = vec![civil_war_essay().into_assignment()];
        let mut other = civil_war_essay();
        other.external_id = "canvas_a_2".into();

        let added = merge_roster(&mut existing, vec![civil_war_essay(), other.clone(), other]);
        assert_eq!(added, 1);
        let ids: Vec<&str> = existing.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["canvas_a_1", "canvas_a_2"]);
    }

    #[test]
    fn partition_splits_on_task_count() {
        let unplanned = civil_war_essay().into_assignment();
        let mut planned = unplanned.clone();
        planned.id = "asg-planned".into();
        planned.tasks = (0..2)
            .map(|i| Task {
                id: format!("tsk-{i}"),
                text: "step".into(),
                completed: false,
                eta: 1.0,
            })
            .collect();

        let all = vec![unplanned, planned];
        let (todo, doing) = partition_by_planning(&all);
        assert_eq!(todo.len(), 1);
        assert_eq!(doing[0].id, "asg-planned");
    }
}
