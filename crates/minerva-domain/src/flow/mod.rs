//! The unlock-graph core: an incrementally assembled view model of the
//! task prerequisite relation.
//!
//! [`FlowGraph`] owns the deduplicated node/edge sets and their layout
//! positions; [`TaskFlowchart`] drives it from repository fetches in
//! response to view events. The rendering layer consumes the ordered node
//! and edge sequences; it is not part of this crate.

pub mod edge;
pub mod graph;
pub mod layout;
pub mod node;
pub mod service;

pub use edge::{edge_id, FlowEdge};
pub use graph::FlowGraph;
pub use layout::{Position, FAN_SPACING, GOAL_SPACING, LAYER_SPACING};
pub use node::FlowNode;
pub use service::{CreateTaskInput, TaskCreated, TaskFlowchart};
