use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::profile::ProfileId;
use crate::team::TeamId;

pub type TaskId = i64;

/// A task row as stored in the backend.
///
/// `unlocks` references at most one other task: completing this task is a
/// prerequisite for the referenced one. A task with no `unlocks` value is a
/// goal (a root of the prerequisite graph). Status is an open-ended small
/// set ("pending", "in review", "done", ...) and is treated as opaque text
/// everywhere outside the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub status: String,
    pub team_id: Option<TeamId>,
    pub assigned_to: Option<ProfileId>,
    pub created_by: Option<ProfileId>,
    pub due_date: Option<DateTime<Utc>>,
    pub unlocks: Option<TaskId>,
    pub created_at: DateTime<Utc>,
}

pub const DEFAULT_TASK_STATUS: &str = "pending";

impl Task {
    pub fn new(id: TaskId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            status: DEFAULT_TASK_STATUS.to_string(),
            team_id: None,
            assigned_to: None,
            created_by: None,
            due_date: None,
            unlocks: None,
            created_at: Utc::now(),
        }
    }

    /// Goals carry no `unlocks` reference; they form the top row of the
    /// prerequisite graph.
    pub fn is_goal(&self) -> bool {
        self.unlocks.is_none()
    }

    pub fn unlocking(mut self, unlocked: TaskId) -> Self {
        self.unlocks = Some(unlocked);
        self
    }

    pub fn with_team(mut self, team_id: TeamId) -> Self {
        self.team_id = Some(team_id);
        self
    }
}

/// Fields for creating a task through the repository. The backend assigns
/// the id and creation timestamp.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub status: Option<String>,
    pub team_id: Option<TeamId>,
    pub assigned_to: Option<ProfileId>,
    pub created_by: Option<ProfileId>,
    pub due_date: Option<DateTime<Utc>>,
    pub unlocks: Option<TaskId>,
}
