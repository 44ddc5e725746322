use serde::{Deserialize, Serialize};

use crate::task::TaskId;

/// A directed edge from a prerequisite task's node to the node of the task
/// it unlocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowEdge {
    pub id: String,
    pub source: String,
    pub target: String,
}

/// Edge identifier for the ordered pair (prerequisite, unlocked).
///
/// Deterministic, so re-deriving the same pair is idempotent.
pub fn edge_id(prerequisite: TaskId, unlocked: TaskId) -> String {
    format!("{}-{}", prerequisite, unlocked)
}

impl FlowEdge {
    pub fn between(prerequisite: TaskId, unlocked: TaskId) -> Self {
        Self {
            id: edge_id(prerequisite, unlocked),
            source: prerequisite.to_string(),
            target: unlocked.to_string(),
        }
    }
}
