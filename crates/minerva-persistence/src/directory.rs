use std::collections::HashSet;
use std::path::Path;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use minerva_core::{MinervaError, MinervaResult};
use minerva_domain::{
    NewTask, PermissionFlag, PermissionGrant, PermissionRepository, Profile, ProfileId,
    ProfileRepository, ProfileUpdate, Task, TaskId, TaskRepository, Team, TeamRepository,
    CAN_CREATE_GOAL,
};

use crate::store::JsonFileStore;
use crate::traits::{PersistenceMetadata, PersistenceStore, StoreSnapshot};

/// One task/profile association row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskParticipant {
    pub task_id: TaskId,
    pub profile_id: ProfileId,
}

/// The full directory payload as persisted in the data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryData {
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub permissions: Vec<PermissionGrant>,
    #[serde(default)]
    pub task_participants: Vec<TaskParticipant>,
}

impl DirectoryData {
    fn next_task_id(&self) -> TaskId {
        self.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1
    }

    fn has_flag(&self, profile_id: ProfileId, permission: PermissionFlag) -> bool {
        self.permissions
            .iter()
            .any(|g| g.profile_id == profile_id && g.permission == permission)
    }

    fn task_exists(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == id)
    }
}

/// File-backed implementation of the directory's repository traits.
///
/// This is the stand-in for the hosted data backend: every mutation is
/// persisted with an atomic write before it returns. The lock exists only
/// to keep the `&self` repository methods sound; writers are serialized,
/// there are no transactions.
///
/// The `canCreateGoal` rule is enforced here, not in the view layer:
/// creating a task with no `unlocks` value requires the acting profile to
/// hold the goal-creation flag.
pub struct JsonDirectory {
    store: JsonFileStore,
    state: RwLock<DirectoryData>,
    actor: Option<ProfileId>,
}

impl JsonDirectory {
    /// Open the directory at `path`, loading the data file if it exists.
    pub async fn open(path: impl AsRef<Path>) -> MinervaResult<Self> {
        let store = JsonFileStore::new(path);

        let data = if store.exists().await {
            let (snapshot, _metadata) = store.load().await?;
            serde_json::from_slice(&snapshot.data)
                .map_err(|e| MinervaError::Serialization(e.to_string()))?
        } else {
            DirectoryData::default()
        };

        Ok(Self {
            store,
            state: RwLock::new(data),
            actor: None,
        })
    }

    /// Set the acting profile used for permission checks.
    pub fn with_actor(mut self, actor: Option<ProfileId>) -> Self {
        self.actor = actor;
        self
    }

    pub fn actor(&self) -> Option<ProfileId> {
        self.actor
    }

    /// Clone of the current payload, for export and listing views.
    pub async fn export_data(&self) -> DirectoryData {
        self.state.read().await.clone()
    }

    /// Replace the payload wholesale and persist it.
    pub async fn import_data(&self, data: DirectoryData) -> MinervaResult<()> {
        let mut state = self.state.write().await;
        *state = data;
        self.persist(&state).await
    }

    /// Persist the current payload even if nothing changed (seeds a fresh
    /// data file).
    pub async fn save(&self) -> MinervaResult<()> {
        let state = self.state.read().await;
        self.persist(&state).await
    }

    async fn persist(&self, data: &DirectoryData) -> MinervaResult<()> {
        let bytes = serde_json::to_vec_pretty(data)
            .map_err(|e| MinervaError::Serialization(e.to_string()))?;
        let snapshot = StoreSnapshot {
            data: bytes,
            metadata: PersistenceMetadata::new(self.store.instance_id()),
        };
        self.store.save(snapshot).await?;
        Ok(())
    }
}

fn by_creation(tasks: &mut Vec<Task>) {
    tasks.sort_by_key(|t| (t.created_at, t.id));
}

#[async_trait]
impl TaskRepository for JsonDirectory {
    async fn list_goal_tasks(&self) -> MinervaResult<Vec<Task>> {
        let state = self.state.read().await;
        let mut goals: Vec<_> = state.tasks.iter().filter(|t| t.is_goal()).cloned().collect();
        by_creation(&mut goals);
        Ok(goals)
    }

    async fn list_prerequisites(&self, task_id: TaskId) -> MinervaResult<Vec<Task>> {
        let state = self.state.read().await;
        let mut prerequisites: Vec<_> = state
            .tasks
            .iter()
            .filter(|t| t.unlocks == Some(task_id))
            .cloned()
            .collect();
        by_creation(&mut prerequisites);
        Ok(prerequisites)
    }

    async fn create_task(&self, fields: NewTask) -> MinervaResult<Task> {
        if fields.title.trim().is_empty() {
            return Err(MinervaError::Validation("task title is required".to_string()));
        }

        let mut state = self.state.write().await;

        match fields.unlocks {
            None => {
                let allowed = self
                    .actor
                    .is_some_and(|actor| state.has_flag(actor, CAN_CREATE_GOAL));
                if !allowed {
                    return Err(MinervaError::PermissionDenied(
                        "creating top-level tasks requires the goal-creation permission"
                            .to_string(),
                    ));
                }
            }
            Some(unlocked) => {
                if !state.task_exists(unlocked) {
                    return Err(MinervaError::NotFound(format!("Task {}", unlocked)));
                }
            }
        }

        let task = Task {
            id: state.next_task_id(),
            title: fields.title,
            status: fields
                .status
                .unwrap_or_else(|| minerva_domain::task::DEFAULT_TASK_STATUS.to_string()),
            team_id: fields.team_id,
            assigned_to: fields.assigned_to,
            created_by: fields.created_by.or(self.actor),
            due_date: fields.due_date,
            unlocks: fields.unlocks,
            created_at: chrono::Utc::now(),
        };
        state.tasks.push(task.clone());
        self.persist(&state).await?;

        tracing::info!(task_id = task.id, "created task");
        Ok(task)
    }

    async fn attach_participants(
        &self,
        task_id: TaskId,
        profile_ids: Vec<ProfileId>,
    ) -> MinervaResult<()> {
        if profile_ids.is_empty() {
            return Ok(());
        }

        let mut state = self.state.write().await;
        if !state.task_exists(task_id) {
            return Err(MinervaError::NotFound(format!("Task {}", task_id)));
        }

        let existing: HashSet<_> = state
            .task_participants
            .iter()
            .filter(|p| p.task_id == task_id)
            .map(|p| p.profile_id)
            .collect();

        let mut seen = existing;
        for profile_id in profile_ids {
            if seen.insert(profile_id) {
                state.task_participants.push(TaskParticipant {
                    task_id,
                    profile_id,
                });
            }
        }
        self.persist(&state).await
    }

    async fn list_tasks(&self) -> MinervaResult<Vec<Task>> {
        let state = self.state.read().await;
        let mut tasks = state.tasks.clone();
        by_creation(&mut tasks);
        Ok(tasks)
    }

    async fn list_my_tasks(&self, profile_id: ProfileId) -> MinervaResult<Vec<Task>> {
        let state = self.state.read().await;

        let participating: HashSet<_> = state
            .task_participants
            .iter()
            .filter(|p| p.profile_id == profile_id)
            .map(|p| p.task_id)
            .collect();

        let mut seen = HashSet::new();
        let mut tasks: Vec<_> = state
            .tasks
            .iter()
            .filter(|t| t.assigned_to == Some(profile_id) || participating.contains(&t.id))
            .filter(|t| seen.insert(t.id))
            .cloned()
            .collect();

        // Due date first, falling back to creation date for undated tasks.
        tasks.sort_by_key(|t| (t.due_date.unwrap_or(t.created_at), t.id));
        Ok(tasks)
    }
}

#[async_trait]
impl TeamRepository for JsonDirectory {
    async fn list_teams(&self) -> MinervaResult<Vec<Team>> {
        let state = self.state.read().await;
        let mut teams = state.teams.clone();
        teams.sort_by_key(|t| t.id);
        Ok(teams)
    }
}

#[async_trait]
impl ProfileRepository for JsonDirectory {
    async fn list_profiles(&self) -> MinervaResult<Vec<Profile>> {
        let state = self.state.read().await;
        let mut profiles = state.profiles.clone();
        profiles.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(profiles)
    }

    async fn get_profile(&self, id: ProfileId) -> MinervaResult<Option<Profile>> {
        let state = self.state.read().await;
        Ok(state.profiles.iter().find(|p| p.id == id).cloned())
    }

    async fn update_profile(
        &self,
        id: ProfileId,
        updates: ProfileUpdate,
    ) -> MinervaResult<Profile> {
        let mut state = self.state.write().await;
        let profile = state
            .profiles
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| MinervaError::NotFound(format!("Profile {}", id)))?;

        if let Some(username) = updates.username {
            profile.username = Some(username);
        }
        if let Some(full_name) = updates.full_name {
            profile.full_name = Some(full_name);
        }
        if let Some(avatar_url) = updates.avatar_url {
            profile.avatar_url = Some(avatar_url);
        }
        if let Some(last_login) = updates.last_login {
            profile.last_login = Some(last_login);
        }

        let updated = profile.clone();
        self.persist(&state).await?;
        Ok(updated)
    }
}

#[async_trait]
impl PermissionRepository for JsonDirectory {
    async fn has_permission(
        &self,
        profile_id: ProfileId,
        permission: PermissionFlag,
    ) -> MinervaResult<bool> {
        let state = self.state.read().await;
        Ok(state.has_flag(profile_id, permission))
    }

    async fn list_permissions(&self) -> MinervaResult<Vec<PermissionGrant>> {
        let state = self.state.read().await;
        Ok(state.permissions.clone())
    }

    async fn grant(&self, profile_id: ProfileId, permission: PermissionFlag) -> MinervaResult<()> {
        let mut state = self.state.write().await;
        if state.has_flag(profile_id, permission) {
            return Ok(());
        }
        state.permissions.push(PermissionGrant {
            profile_id,
            permission,
        });
        self.persist(&state).await
    }

    async fn revoke(
        &self,
        profile_id: ProfileId,
        permission: PermissionFlag,
    ) -> MinervaResult<()> {
        let mut state = self.state.write().await;
        state
            .permissions
            .retain(|g| !(g.profile_id == profile_id && g.permission == permission));
        self.persist(&state).await
    }
}
