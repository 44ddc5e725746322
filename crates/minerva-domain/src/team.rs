use serde::{Deserialize, Serialize};

pub type TeamId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub name: String,
}

pub const DEFAULT_TEAM_COLOR: &str = "#94a3b8";

/// Fixed presentation palette keyed by team id.
///
/// The teams table carries no color column, so node colors come from this
/// mapping with a gray fallback for unknown or missing teams.
pub fn team_color(team_id: Option<TeamId>) -> &'static str {
    match team_id {
        Some(1) => "#f87171",
        Some(2) => "#60a5fa",
        Some(3) => "#facc15",
        Some(4) => "#4ade80",
        Some(5) => "#c084fc",
        _ => DEFAULT_TEAM_COLOR,
    }
}
