use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Edge between a pull request and one of its reviewers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewerAssignment {
    pub pull_request_id: String,
    pub user_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub assigned_at: OffsetDateTime,
}

impl ReviewerAssignment {
    pub fn new(pull_request_id: &str, user_id: &str) -> Self {
        Self {
            pull_request_id: pull_request_id.into(),
            user_id: user_id.into(),
            assigned_at: OffsetDateTime::now_utc(),
        }
    }
}
