use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type ProfileId = Uuid;

/// A user profile row. Authentication itself lives outside this system;
/// profiles are the directory entries other records reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

impl Profile {
    pub fn new(id: ProfileId) -> Self {
        Self {
            id,
            username: None,
            full_name: None,
            avatar_url: None,
            last_login: None,
        }
    }

    pub fn display_name(&self) -> &str {
        self.full_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("unknown")
    }
}

/// Partial update for a profile; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub avatar_url: Option<String>,
    pub last_login: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_full_name() {
        let mut profile = Profile::new(Uuid::new_v4());
        profile.username = Some("jdoe".to_string());
        profile.full_name = Some("Jane Doe".to_string());
        assert_eq!(profile.display_name(), "Jane Doe");
    }

    #[test]
    fn test_display_name_falls_back() {
        let mut profile = Profile::new(Uuid::new_v4());
        assert_eq!(profile.display_name(), "unknown");
        profile.username = Some("jdoe".to_string());
        assert_eq!(profile.display_name(), "jdoe");
    }
}
