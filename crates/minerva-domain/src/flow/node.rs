use serde::{Deserialize, Serialize};

use super::layout::Position;
use crate::task::Task;
use crate::team::team_color;

/// One task rendered as a graph node.
///
/// The node id is the string form of the task id and is unique within a
/// graph; the color is derived from the task's team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    pub id: String,
    pub label: String,
    pub position: Position,
    pub color: String,
}

impl FlowNode {
    pub fn from_task(task: &Task, position: Position) -> Self {
        Self {
            id: task.id.to_string(),
            label: task.title.clone(),
            position,
            color: team_color(task.team_id).to_string(),
        }
    }

    /// Whether this node sits on the goal row.
    pub fn is_top_level(&self) -> bool {
        self.position.y == 0.0
    }
}
