//! Value operations on [`Assignment`].
//!
//! Every mutation takes `&self` and returns a new `Assignment`. When a task ID
//! does not match, the error is returned and the original value is untouched.
//! Totals are never patched: they are recomputed from the task list on demand.

use chrono::NaiveDate;

use crate::entities::{Assignment, Task};
use crate::enums::{AssignmentSource, EntityType};
use crate::errors::CoreError;
use crate::ids::{self, PREFIX_ASSIGNMENT};
use crate::milestones::{self, MilestoneSet};
use crate::progress::{self, Progress};

impl Assignment {
    /// A manually entered assignment with no tasks yet.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank title and
    /// `CoreError::IdGeneration` if no ID can be drawn.
    pub fn new(
        title: &str,
        course: &str,
        due_date: Option<NaiveDate>,
        description: &str,
    ) -> Result<Self, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("assignment title is required".into()));
        }
        Ok(Self {
            id: ids::generate(PREFIX_ASSIGNMENT)?,
            title: title.to_string(),
            course: course.trim().to_string(),
            due_date,
            description: description.to_string(),
            ai_summary: None,
            professor_analysis: None,
            planned_description: None,
            source: AssignmentSource::Manual,
            tasks: Vec::new(),
        })
    }

    /// Look up an owned task by ID.
    #[must_use]
    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn task_index(&self, id: &str) -> Result<usize, CoreError> {
        self.tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found(EntityType::Task.as_str(), id))
    }

    /// Append a manually entered milestone.
    ///
    /// Returns the new assignment and the task that was added.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank text or a bad estimate.
    pub fn add_task(&self, text: &str, eta: &str) -> Result<(Self, Task), CoreError> {
        let task = milestones::manual_task(text, eta, &self.tasks)?;
        let mut next = self.clone();
        next.tasks.push(task.clone());
        Ok((next, task))
    }

    /// Replace the text of one task.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown ID and
    /// `CoreError::Validation` for blank text.
    pub fn edit_task_text(&self, id: &str, text: &str) -> Result<Self, CoreError> {
        let index = self.task_index(id)?;
        let text = milestones::validate_text(text)?;
        let mut next = self.clone();
        next.tasks[index].text = text;
        Ok(next)
    }

    /// Remove one task, keeping the order of the others.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown ID.
    pub fn delete_task(&self, id: &str) -> Result<Self, CoreError> {
        let index = self.task_index(id)?;
        let mut next = self.clone();
        next.tasks.remove(index);
        Ok(next)
    }

    /// Flip the completed flag of one task.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown ID.
    pub fn toggle_task_completed(&self, id: &str) -> Result<Self, CoreError> {
        let index = self.task_index(id)?;
        let mut next = self.clone();
        next.tasks[index].completed = !next.tasks[index].completed;
        Ok(next)
    }

    /// Install a generated plan: its tasks replace the current list and the
    /// summary is set. Records the description the plan was generated from.
    #[must_use]
    pub fn with_plan(&self, plan: MilestoneSet, summary: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.tasks = plan.into_tasks();
        next.ai_summary = Some(summary.into());
        next.planned_description = Some(self.description.clone());
        next
    }

    /// Sum of task estimates in hours.
    #[must_use]
    pub fn total_estimate(&self) -> f64 {
        progress::total_estimate(&self.tasks)
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        progress::calculate(&self.tasks)
    }

    /// At most one task counts as "not planned yet" on the dashboard.
    #[must_use]
    pub fn is_unplanned(&self) -> bool {
        self.tasks.len() <= 1
    }

    /// True when the current tasks were generated from a different description.
    ///
    /// Manually planned assignments (no recorded description) never need it.
    #[must_use]
    pub fn needs_regeneration(&self) -> bool {
        self.planned_description
            .as_deref()
            .is_some_and(|planned| planned != self.description)
    }

    /// The professor tip shown next to the milestone at `index`.
    ///
    /// Pending analyses give no tips.
    #[must_use]
    pub fn tip_for(&self, index: usize) -> Option<&str> {
        let analysis = self.professor_analysis.as_ref().filter(|p| p.is_complete())?;
        let tips = &analysis.tips;
        if tips.is_empty() {
            return None;
        }
        tips.get(index % tips.len()).map(String::as_str)
    }
}
