use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::progress::Estimated;

/// Name of the branch every group project starts with. It can be neither
/// renamed nor deleted.
pub const MAIN_BRANCH: &str = "main";

/// A collaborator on a group project.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Member {
    pub id: String,
    pub name: String,
}

/// A task on the group board, owned by one member.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GroupTask {
    pub id: String,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub eta: f64,
    /// Member ID of the assignee.
    pub assignee: String,
}

impl Estimated for GroupTask {
    fn eta(&self) -> f64 {
        self.eta
    }

    fn is_completed(&self) -> bool {
        self.completed
    }
}

/// A free-text progress note posted to a branch's history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct BranchUpdate {
    pub id: String,
    pub message: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
}

/// A multi-member project with a task board and a branch-keyed update history.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct GroupProject {
    pub id: String,
    pub title: String,
    pub course: String,
    pub members: Vec<Member>,
    pub due_date: Option<NaiveDate>,
    pub description: String,
    #[serde(default)]
    pub tasks: Vec<GroupTask>,
    /// Update history per branch, newest first.
    pub versions: BTreeMap<String, Vec<BranchUpdate>>,
    pub active_branch: String,
}
