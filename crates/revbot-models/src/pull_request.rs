use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::PullRequestStatus;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequest {
    #[serde(rename = "pull_request_id")]
    pub id: String,
    #[serde(rename = "pull_request_name")]
    pub title: String,
    pub author_id: String,
    pub status: PullRequestStatus,
    /// Currently assigned reviewers; order carries no meaning.
    pub assigned_reviewers: Vec<String>,
    #[serde(
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<OffsetDateTime>,
    #[serde(
        with = "time::serde::rfc3339::option",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub merged_at: Option<OffsetDateTime>,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.status == PullRequestStatus::Merged
    }

    pub fn has_reviewer(&self, user_id: &str) -> bool {
        self.assigned_reviewers.iter().any(|r| r == user_id)
    }

    pub fn with_reviewers(mut self, reviewers: Vec<String>) -> Self {
        self.assigned_reviewers = reviewers;
        self
    }

    pub fn to_short(&self) -> PullRequestShort {
        PullRequestShort {
            id: self.id.clone(),
            title: self.title.clone(),
            author_id: self.author_id.clone(),
            status: self.status,
        }
    }
}

/// Pull request summary, without reviewers and timestamps.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PullRequestShort {
    #[serde(rename = "pull_request_id")]
    pub id: String,
    #[serde(rename = "pull_request_name")]
    pub title: String,
    pub author_id: String,
    pub status: PullRequestStatus,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use time::macros::datetime;

    use super::*;

    #[test]
    fn serialize() {
        let pr = PullRequest {
            id: "pr-1".into(),
            title: "Add search".into(),
            author_id: "u1".into(),
            assigned_reviewers: vec!["u2".into()],
            created_at: Some(datetime!(2024-05-01 10:00 UTC)),
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&pr).unwrap(),
            serde_json::json!({
                "pull_request_id": "pr-1",
                "pull_request_name": "Add search",
                "author_id": "u1",
                "status": "OPEN",
                "assigned_reviewers": ["u2"],
                "created_at": "2024-05-01T10:00:00Z"
            })
        );
    }

    #[test]
    fn short() {
        let pr = PullRequest {
            id: "pr-1".into(),
            title: "Add search".into(),
            author_id: "u1".into(),
            status: PullRequestStatus::Merged,
            ..Default::default()
        };

        assert_eq!(
            pr.to_short(),
            PullRequestShort {
                id: "pr-1".into(),
                title: "Add search".into(),
                author_id: "u1".into(),
                status: PullRequestStatus::Merged,
            }
        );
        assert!(pr.is_merged());
    }
}
