use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub team_name: String,
    pub is_active: bool,
}

impl Default for User {
    fn default() -> Self {
        Self {
            user_id: String::new(),
            username: String::new(),
            team_name: String::new(),
            is_active: true,
        }
    }
}
