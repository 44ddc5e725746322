pub mod flow;
pub mod permission;
pub mod profile;
pub mod repository;
pub mod task;
pub mod team;

pub use flow::{
    CreateTaskInput, FlowEdge, FlowGraph, FlowNode, Position, TaskCreated, TaskFlowchart,
};
pub use permission::{PermissionFlag, PermissionGrant, CAN_CREATE_GOAL};
pub use profile::{Profile, ProfileId, ProfileUpdate};
pub use repository::{PermissionRepository, ProfileRepository, TaskRepository, TeamRepository};
pub use task::{NewTask, Task, TaskId};
pub use team::{team_color, Team, TeamId};
