use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use minerva_core::MinervaResult;

use crate::permission::{PermissionFlag, PermissionGrant};
use crate::profile::{Profile, ProfileId, ProfileUpdate};
use crate::task::{NewTask, Task, TaskId};
use crate::team::Team;

/// Task reads and writes against the hosted backend.
///
/// The graph core consumes `list_goal_tasks`, `list_prerequisites`,
/// `create_task`, and `attach_participants`; the remaining operations serve
/// the listing views.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Tasks with no `unlocks` value, in creation order.
    async fn list_goal_tasks(&self) -> MinervaResult<Vec<Task>>;

    /// Tasks whose `unlocks` value equals `task_id`, in creation order.
    async fn list_prerequisites(&self, task_id: TaskId) -> MinervaResult<Vec<Task>>;

    async fn create_task(&self, fields: NewTask) -> MinervaResult<Task>;

    /// Associate profiles with a task. Existing associations are kept.
    async fn attach_participants(
        &self,
        task_id: TaskId,
        profile_ids: Vec<ProfileId>,
    ) -> MinervaResult<()>;

    /// All tasks, in creation order.
    async fn list_tasks(&self) -> MinervaResult<Vec<Task>>;

    /// Tasks the profile is assigned to or participates in, deduplicated,
    /// ordered by due date and then creation date.
    async fn list_my_tasks(&self, profile_id: ProfileId) -> MinervaResult<Vec<Task>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// All teams, in id order.
    async fn list_teams(&self) -> MinervaResult<Vec<Team>>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// All profiles, ordered by full name.
    async fn list_profiles(&self) -> MinervaResult<Vec<Profile>>;

    async fn get_profile(&self, id: ProfileId) -> MinervaResult<Option<Profile>>;

    async fn update_profile(&self, id: ProfileId, updates: ProfileUpdate)
        -> MinervaResult<Profile>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait PermissionRepository: Send + Sync {
    async fn has_permission(
        &self,
        profile_id: ProfileId,
        permission: PermissionFlag,
    ) -> MinervaResult<bool>;

    async fn list_permissions(&self) -> MinervaResult<Vec<PermissionGrant>>;

    /// Grant a flag; granting an already-held flag is a no-op.
    async fn grant(&self, profile_id: ProfileId, permission: PermissionFlag) -> MinervaResult<()>;

    async fn revoke(&self, profile_id: ProfileId, permission: PermissionFlag)
        -> MinervaResult<()>;
}
