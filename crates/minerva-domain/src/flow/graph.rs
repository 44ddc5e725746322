use std::collections::{HashMap, HashSet};

use super::edge::{edge_id, FlowEdge};
use super::layout::Position;
use super::node::FlowNode;
use crate::task::{Task, TaskId};

/// The in-memory graph model: one node per task, directed edges from
/// prerequisites to the tasks they unlock, insertion-ordered read views.
///
/// Node and edge addition is idempotent by identifier, which is what makes
/// overlapping expansions of the same node harmless. Identity is the id
/// alone: re-adding a task whose other fields changed leaves the existing
/// node untouched.
///
/// The graph is a client-side presentation artifact: it is never persisted,
/// and is rebuilt from the repository whenever a view session opens.
#[derive(Debug, Clone, Default)]
pub struct FlowGraph {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
    node_index: HashMap<String, usize>,
    edge_ids: HashSet<String>,
}

impl FlowGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nodes, in insertion order. Order is stable across merges.
    pub fn nodes(&self) -> &[FlowNode] {
        &self.nodes
    }

    /// Current edges, in insertion order.
    pub fn edges(&self) -> &[FlowEdge] {
        &self.edges
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn contains_node(&self, task_id: TaskId) -> bool {
        self.node_index.contains_key(task_id.to_string().as_str())
    }

    pub fn node(&self, task_id: TaskId) -> Option<&FlowNode> {
        self.node_index
            .get(task_id.to_string().as_str())
            .map(|&i| &self.nodes[i])
    }

    pub fn node_position(&self, task_id: TaskId) -> Option<Position> {
        self.node(task_id).map(|n| n.position)
    }

    /// Number of tasks in `tasks` not yet present as nodes, counting
    /// repeated ids once. This is the `k` the fan-out layout spreads over.
    pub fn count_missing(&self, tasks: &[Task]) -> usize {
        let mut seen = HashSet::new();
        tasks
            .iter()
            .filter(|t| !self.contains_node(t.id) && seen.insert(t.id))
            .count()
    }

    /// Add a node for `task` unless one exists. Returns whether a node was
    /// added.
    pub fn add_node(&mut self, task: &Task, position: Position) -> bool {
        if self.contains_node(task.id) {
            return false;
        }
        self.push_node(FlowNode::from_task(task, position));
        true
    }

    /// Merge `tasks` into the node set. Tasks already present are skipped;
    /// `position` is called once per genuinely new node with that node's
    /// index among the new ones. Returns the number of nodes added.
    pub fn add_nodes<F>(&mut self, tasks: &[Task], mut position: F) -> usize
    where
        F: FnMut(usize, &Task) -> Position,
    {
        let mut added = 0;
        for task in tasks {
            if self.contains_node(task.id) {
                continue;
            }
            let pos = position(added, task);
            self.push_node(FlowNode::from_task(task, pos));
            added += 1;
        }
        added
    }

    /// Merge `(prerequisite, unlocked)` pairs into the edge set. Pairs
    /// already present are skipped, as are pairs with a missing endpoint:
    /// edges exist only alongside their nodes. Returns the number of edges
    /// added.
    pub fn add_edges(&mut self, pairs: &[(TaskId, TaskId)]) -> usize {
        let mut added = 0;
        for &(prerequisite, unlocked) in pairs {
            let id = edge_id(prerequisite, unlocked);
            if self.edge_ids.contains(&id) {
                continue;
            }
            if !self.contains_node(prerequisite) || !self.contains_node(unlocked) {
                continue;
            }
            self.edge_ids.insert(id);
            self.edges.push(FlowEdge::between(prerequisite, unlocked));
            added += 1;
        }
        added
    }

    /// Largest x among top-row (y = 0) nodes, if any. Drives placement of
    /// newly created goals.
    pub fn rightmost_top_level_x(&self) -> Option<f64> {
        self.nodes
            .iter()
            .filter(|n| n.is_top_level())
            .map(|n| n.position.x)
            .fold(None, |max, x| Some(max.map_or(x, |m: f64| m.max(x))))
    }

    /// Drop all nodes and edges. Supports the rebuild-from-scratch
    /// lifecycle when a view session reopens.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.node_index.clear();
        self.edge_ids.clear();
    }

    fn push_node(&mut self, node: FlowNode) {
        self.node_index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
    }
}
