use serde::{Deserialize, Serialize};

use crate::profile::ProfileId;

pub type PermissionFlag = i32;

/// Capability required to create top-level (goal) tasks. Creating a
/// prerequisite under an existing task needs no flag.
pub const CAN_CREATE_GOAL: PermissionFlag = 3;

/// One granted capability for one profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionGrant {
    pub profile_id: ProfileId,
    pub permission: PermissionFlag,
}
