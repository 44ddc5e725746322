use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use minerva_core::{MinervaError, MinervaResult, SelectionState};

use super::graph::FlowGraph;
use super::layout;
use super::node::FlowNode;
use super::FlowEdge;
use crate::profile::ProfileId;
use crate::repository::TaskRepository;
use crate::task::{NewTask, Task, TaskId};
use crate::team::TeamId;

/// View-layer input for creating a task. The `unlocks` reference is not
/// part of this struct: it comes from the creation target passed to
/// [`TaskFlowchart::create_task`].
#[derive(Debug, Clone, Default)]
pub struct CreateTaskInput {
    pub title: String,
    pub status: Option<String>,
    pub team_id: Option<TeamId>,
    pub assigned_to: Option<ProfileId>,
    pub created_by: Option<ProfileId>,
    pub due_date: Option<DateTime<Utc>>,
    pub participants: Vec<ProfileId>,
}

/// Outcome of a successful create. `participant_warning` is set when the
/// task exists but attaching participants failed; the create is not rolled
/// back for that.
#[derive(Debug)]
pub struct TaskCreated {
    pub task: Task,
    pub participant_warning: Option<MinervaError>,
}

/// Drives the unlock graph from repository fetches.
///
/// All mutation happens through `&mut self` in response to discrete view
/// events; fetches are async and may suspend, and two overlapping
/// expansions of the same node converge because the graph merge is
/// idempotent. A fetch that resolves always applies its result; there is
/// no cancellation and no retry.
pub struct TaskFlowchart {
    repository: Arc<dyn TaskRepository>,
    graph: FlowGraph,
    known_tasks: HashMap<TaskId, Task>,
    selection: SelectionState<Task>,
}

impl TaskFlowchart {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self {
            repository,
            graph: FlowGraph::new(),
            known_tasks: HashMap::new(),
            selection: SelectionState::new(),
        }
    }

    /// Rebuild the graph from scratch: all goal tasks on the top row, in
    /// backend return order, no edges. Returns the number of goals placed.
    pub async fn load(&mut self) -> MinervaResult<usize> {
        self.graph.clear();
        self.known_tasks.clear();
        self.selection.clear();

        let goals = self
            .repository
            .list_goal_tasks()
            .await
            .map_err(as_fetch_failure)?;

        let placed = self.graph.add_nodes(&goals, |i, _| layout::goal_position(i));
        for goal in goals {
            self.known_tasks.insert(goal.id, goal);
        }
        Ok(placed)
    }

    pub fn select(&mut self, task: Option<Task>) {
        self.selection.set(task);
    }

    /// The read-only "selected task" value the toolbar renders.
    pub fn selected_task(&self) -> Option<&Task> {
        self.selection.get()
    }

    /// Fetch and merge the direct prerequisites of `selected`.
    ///
    /// With no selection this returns without touching anything. A fetch
    /// failure leaves the graph untouched and surfaces as `FetchFailed`;
    /// the view shows no prerequisites and the user may try again. Returns
    /// the number of nodes added (prerequisites already present are skipped
    /// for node creation but still get their edge).
    pub async fn expand(&mut self, selected: Option<&Task>) -> MinervaResult<usize> {
        let Some(task) = selected else {
            return Ok(0);
        };

        let prerequisites = self
            .repository
            .list_prerequisites(task.id)
            .await
            .map_err(as_fetch_failure)?;
        if prerequisites.is_empty() {
            return Ok(0);
        }

        let parent = self.graph.node_position(task.id).unwrap_or_default();
        let new_count = self.graph.count_missing(&prerequisites);
        let added = self
            .graph
            .add_nodes(&prerequisites, |i, _| {
                layout::fan_out_position(parent, i, new_count)
            });

        let pairs: Vec<_> = prerequisites.iter().map(|p| (p.id, task.id)).collect();
        self.graph.add_edges(&pairs);

        for prerequisite in prerequisites {
            self.known_tasks.insert(prerequisite.id, prerequisite);
        }
        Ok(added)
    }

    /// Create a task through the repository and merge it into the graph.
    ///
    /// With `unlocked == None` the new task is a goal and lands after the
    /// rightmost top-row node. Otherwise it lands one layer below
    /// `unlocked` with an edge up to it. Authorization rejections surface
    /// as `PermissionDenied`, anything else as `CreateFailed`; neither is
    /// retried. A participant-attach failure is reported on the returned
    /// value without undoing the create.
    pub async fn create_task(
        &mut self,
        input: CreateTaskInput,
        unlocked: Option<&Task>,
    ) -> MinervaResult<TaskCreated> {
        let fields = NewTask {
            title: input.title,
            status: input.status,
            team_id: input.team_id,
            assigned_to: input.assigned_to,
            created_by: input.created_by,
            due_date: input.due_date,
            unlocks: unlocked.map(|t| t.id),
        };

        let task = match self.repository.create_task(fields).await {
            Ok(task) => task,
            Err(err @ MinervaError::PermissionDenied(_)) => return Err(err),
            Err(err @ MinervaError::CreateFailed(_)) => return Err(err),
            Err(other) => return Err(MinervaError::CreateFailed(other.to_string())),
        };

        match unlocked {
            None => {
                let position = layout::next_goal_position(self.graph.rightmost_top_level_x());
                self.graph.add_node(&task, position);
            }
            Some(unlocked) => {
                let parent = self.graph.node_position(unlocked.id).unwrap_or_default();
                self.graph.add_node(&task, layout::below(parent));
                self.graph.add_edges(&[(task.id, unlocked.id)]);
            }
        }
        self.known_tasks.insert(task.id, task.clone());

        let mut participant_warning = None;
        if !input.participants.is_empty() {
            if let Err(err) = self
                .repository
                .attach_participants(task.id, input.participants)
                .await
            {
                tracing::warn!(task_id = task.id, error = %err, "participants not attached");
                participant_warning =
                    Some(MinervaError::ParticipantAttachFailed(err.to_string()));
            }
        }

        Ok(TaskCreated {
            task,
            participant_warning,
        })
    }

    /// Current nodes, in insertion order.
    pub fn nodes(&self) -> &[FlowNode] {
        self.graph.nodes()
    }

    /// Current edges, in insertion order.
    pub fn edges(&self) -> &[FlowEdge] {
        self.graph.edges()
    }

    pub fn graph(&self) -> &FlowGraph {
        &self.graph
    }

    /// Lookup in the auxiliary known-tasks collection: every task that has
    /// passed through the view, keyed by id.
    pub fn known_task(&self, id: TaskId) -> Option<&Task> {
        self.known_tasks.get(&id)
    }

    pub fn known_task_count(&self) -> usize {
        self.known_tasks.len()
    }
}

/// Prerequisite/goal fetches surface uniformly as `FetchFailed`, keeping
/// transport detail out of the view layer.
fn as_fetch_failure(err: MinervaError) -> MinervaError {
    match err {
        err @ MinervaError::FetchFailed(_) => err,
        other => MinervaError::FetchFailed(other.to_string()),
    }
}
