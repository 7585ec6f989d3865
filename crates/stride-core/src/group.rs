//! Group project operations: task board, branch history, team progress.
//!
//! Like the assignment operations these take `&self` and return a new value.
//! A failed operation leaves the project unchanged.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{BranchUpdate, GroupProject, GroupTask, MAIN_BRANCH, Member};
use crate::enums::EntityType;
use crate::errors::CoreError;
use crate::ids::{self, PREFIX_GROUP_PROJECT, PREFIX_GROUP_TASK, PREFIX_UPDATE};
use crate::milestones;
use crate::progress::{self, Progress};

/// Count-based progress of one member across the tasks assigned to them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MemberProgress {
    pub member_id: String,
    pub name: String,
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}

/// Normalise a user-entered branch name: trimmed, inner whitespace runs to `-`.
#[must_use]
pub fn sanitize_branch_name(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join("-")
}

impl GroupProject {
    /// A new project with an empty `main` branch checked out.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank title or no members, and
    /// `CoreError::IdGeneration` if no ID can be drawn.
    pub fn new(
        title: &str,
        course: &str,
        members: Vec<Member>,
        description: &str,
    ) -> Result<Self, CoreError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CoreError::Validation("project title is required".into()));
        }
        if members.is_empty() {
            return Err(CoreError::Validation("a group project needs at least one member".into()));
        }
        Ok(Self {
            id: ids::generate(PREFIX_GROUP_PROJECT)?,
            title: title.to_string(),
            course: course.trim().to_string(),
            members,
            due_date: None,
            description: description.to_string(),
            tasks: Vec::new(),
            versions: BTreeMap::from([(MAIN_BRANCH.to_string(), Vec::new())]),
            active_branch: MAIN_BRANCH.to_string(),
        })
    }

    #[must_use]
    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Add a task to the board for one member.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for blank text and `CoreError::NotFound`
    /// when `assignee` is not a member.
    pub fn add_task(&self, text: &str, assignee: &str) -> Result<(Self, GroupTask), CoreError> {
        let text = milestones::validate_text(text)?;
        if self.member(assignee).is_none() {
            return Err(CoreError::not_found(EntityType::Member.as_str(), assignee));
        }
        let id = ids::generate_unique(PREFIX_GROUP_TASK, |candidate| {
            self.tasks.iter().any(|t| t.id == candidate)
        })?;
        let task = GroupTask {
            id,
            text,
            completed: false,
            eta: 0.0,
            assignee: assignee.to_string(),
        };
        let mut next = self.clone();
        next.tasks.push(task.clone());
        Ok((next, task))
    }

    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown task ID.
    pub fn toggle_task_completed(&self, id: &str) -> Result<Self, CoreError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| CoreError::not_found(EntityType::GroupTask.as_str(), id))?;
        let mut next = self.clone();
        next.tasks[index].completed = !next.tasks[index].completed;
        Ok(next)
    }

    /// Post an update message to the top of a branch's history.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank message and
    /// `CoreError::NotFound` for an unknown branch.
    pub fn post_update(
        &self,
        branch: &str,
        message: &str,
        author: &str,
        at: DateTime<Utc>,
    ) -> Result<(Self, BranchUpdate), CoreError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(CoreError::Validation("update message is required".into()));
        }
        let history = self
            .versions
            .get(branch)
            .ok_or_else(|| CoreError::not_found(EntityType::Branch.as_str(), branch))?;
        let update = BranchUpdate {
            id: ids::generate_unique(PREFIX_UPDATE, |candidate| {
                history.iter().any(|u| u.id == candidate)
            })?,
            message: message.to_string(),
            author: author.to_string(),
            created_at: at,
        };
        let mut next = self.clone();
        if let Some(history) = next.versions.get_mut(branch) {
            history.insert(0, update.clone());
        }
        Ok((next, update))
    }

    fn free_branch_name(&self, raw: &str) -> Result<String, CoreError> {
        let name = sanitize_branch_name(raw);
        if name.is_empty() {
            return Err(CoreError::Validation("branch name is required".into()));
        }
        if self.versions.contains_key(&name) {
            return Err(CoreError::Validation(format!("branch '{name}' already exists")));
        }
        Ok(name)
    }

    /// Create a branch starting from `main`'s history and check it out.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank or duplicate name.
    pub fn create_branch(&self, raw: &str) -> Result<Self, CoreError> {
        let name = self.free_branch_name(raw)?;
        let base = self.versions.get(MAIN_BRANCH).cloned().unwrap_or_default();
        let mut next = self.clone();
        next.versions.insert(name.clone(), base);
        next.active_branch = name;
        Ok(next)
    }

    /// Rename a branch and check it out under its new name.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when renaming `main` or for a blank or
    /// duplicate name, and `CoreError::NotFound` for an unknown branch.
    pub fn rename_branch(&self, old: &str, raw: &str) -> Result<Self, CoreError> {
        if old == MAIN_BRANCH {
            return Err(CoreError::Validation("the main branch cannot be renamed".into()));
        }
        if !self.versions.contains_key(old) {
            return Err(CoreError::not_found(EntityType::Branch.as_str(), old));
        }
        let name = self.free_branch_name(raw)?;
        let mut next = self.clone();
        let history = next.versions.remove(old).unwrap_or_default();
        next.versions.insert(name.clone(), history);
        next.active_branch = name;
        Ok(next)
    }

    /// Delete a branch and check out `main`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when deleting `main` and
    /// `CoreError::NotFound` for an unknown branch.
    pub fn delete_branch(&self, name: &str) -> Result<Self, CoreError> {
        if name == MAIN_BRANCH {
            return Err(CoreError::Validation("the main branch cannot be deleted".into()));
        }
        if !self.versions.contains_key(name) {
            return Err(CoreError::not_found(EntityType::Branch.as_str(), name));
        }
        let mut next = self.clone();
        next.versions.remove(name);
        next.active_branch = MAIN_BRANCH.to_string();
        Ok(next)
    }

    /// Check out an existing branch.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` for an unknown branch.
    pub fn switch_branch(&self, name: &str) -> Result<Self, CoreError> {
        if !self.versions.contains_key(name) {
            return Err(CoreError::not_found(EntityType::Branch.as_str(), name));
        }
        let mut next = self.clone();
        next.active_branch = name.to_string();
        Ok(next)
    }

    /// Per-member task counts, in member order. Members with no tasks are left out.
    #[must_use]
    pub fn member_progress(&self) -> Vec<MemberProgress> {
        self.members
            .iter()
            .filter_map(|member| {
                let mine: Vec<&GroupTask> =
                    self.tasks.iter().filter(|t| t.assignee == member.id).collect();
                if mine.is_empty() {
                    return None;
                }
                let completed = mine.iter().filter(|t| t.completed).count();
                let total = mine.len();
                #[allow(clippy::cast_precision_loss)]
                let percent = progress::percent_of(completed as f64, total as f64);
                Some(MemberProgress {
                    member_id: member.id.clone(),
                    name: member.name.clone(),
                    completed,
                    total,
                    percent,
                })
            })
            .collect()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        progress::calculate(&self.tasks)
    }
}
