use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project captured in a profile (id + display name at selection time).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileProject {
    pub id: String,
    pub name: String,
}

/// Named selection of a team and its projects to monitor.
///
/// `name` is the unique key. At most one stored profile has `is_default` set;
/// the store enforces that when the default changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub team_id: String,
    #[serde(default)]
    pub selected_projects: Vec<ProfileProject>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub is_default: bool,
}

impl Profile {
    pub fn new(
        name: impl Into<String>,
        team_id: impl Into<String>,
        selected_projects: Vec<ProfileProject>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            team_id: team_id.into(),
            selected_projects,
            created_at,
            is_default: false,
        }
    }

    pub fn project_count(&self) -> usize {
        self.selected_projects.len()
    }
}
