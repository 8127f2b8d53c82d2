use serde::{Deserialize, Serialize};

use crate::User;

fn default_is_active() -> bool {
    true
}

/// Team member, as seen from the team roster.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TeamMember {
    pub user_id: String,
    pub username: String,
    #[serde(default = "default_is_active")]
    pub is_active: bool,
}

impl Default for TeamMember {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            username: String::new(),
            is_active: true,
        }
    }
}

impl TeamMember {
    /// Build the user record for this member, scoped to a team.
    pub fn to_user(&self, team_name: &str) -> User {
        User {
            user_id: self.user_id.clone(),
            username: self.username.clone(),
            team_name: team_name.into(),
            is_active: self.is_active,
        }
    }
}

impl From<User> for TeamMember {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username,
            is_active: user.is_active,
        }
    }
}

/// Team with its current roster.
///
/// The roster is always derived from the users of the team, never stored on its own.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Team {
    pub team_name: String,
    pub members: Vec<TeamMember>,
}
