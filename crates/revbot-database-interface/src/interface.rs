use async_trait::async_trait;
use revbot_models::{PullRequest, Team, User};
use time::OffsetDateTime;

use crate::{DatabaseError, Result};

/// Persistence gateway for teams, users, pull requests and reviewer assignments.
///
/// Every method touching more than one record is atomic: either all of its
/// writes are visible, or none are.
#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait DbService: Send + Sync {
    async fn health_check(&self) -> Result<()>;

    async fn teams_exists(&self, team_name: &str) -> Result<bool>;
    async fn teams_create(&self, team_name: &str) -> Result<()>;
    async fn teams_get_with_members(&self, team_name: &str) -> Result<Option<Team>>;
    async fn teams_get_with_members_expect(&self, team_name: &str) -> Result<Team> {
        self.teams_get_with_members(team_name)
            .await?
            .ok_or_else(|| DatabaseError::UnknownTeam(team_name.into()))
    }

    async fn users_exists(&self, user_id: &str) -> Result<bool>;
    /// Insert the user, or overwrite name, team and active flag if it already exists.
    async fn users_upsert(&self, instance: User) -> Result<User>;
    async fn users_get(&self, user_id: &str) -> Result<Option<User>>;
    async fn users_get_expect(&self, user_id: &str) -> Result<User> {
        self.users_get(user_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownUser(user_id.into()))
    }
    async fn users_update(&self, instance: User) -> Result<User>;
    /// Active users of a team, minus `exclude_user_id`, ordered by user ID.
    async fn users_list_active_in_team(
        &self,
        team_name: &str,
        exclude_user_id: &str,
    ) -> Result<Vec<User>>;

    async fn pull_requests_exists(&self, pull_request_id: &str) -> Result<bool>;
    /// Create the pull request and one assignment per entry of `assigned_reviewers`.
    async fn pull_requests_create(&self, instance: PullRequest) -> Result<PullRequest>;
    async fn pull_requests_get(&self, pull_request_id: &str) -> Result<Option<PullRequest>>;
    async fn pull_requests_get_expect(&self, pull_request_id: &str) -> Result<PullRequest> {
        self.pull_requests_get(pull_request_id)
            .await?
            .ok_or_else(|| DatabaseError::UnknownPullRequest(pull_request_id.into()))
    }
    /// Update title, status and merge timestamp. Reviewers are left untouched.
    async fn pull_requests_update(&self, instance: PullRequest) -> Result<PullRequest>;
    /// Mark an open pull request as merged.
    ///
    /// Returns `false` without touching anything when it is already merged.
    async fn pull_requests_merge(
        &self,
        pull_request_id: &str,
        merged_at: OffsetDateTime,
    ) -> Result<bool>;
    /// Fails with [`DatabaseError::PullRequestMerged`] once the pull request is merged.
    async fn pull_requests_replace_reviewer(
        &self,
        pull_request_id: &str,
        old_user_id: &str,
        new_user_id: &str,
    ) -> Result<PullRequest>;
    /// Fails with [`DatabaseError::PullRequestMerged`] once the pull request is merged.
    async fn pull_requests_replace_reviewers(
        &self,
        pull_request_id: &str,
        reviewers: &[String],
    ) -> Result<PullRequest>;
    /// Pull requests where the user is an assigned reviewer, ordered by ID.
    async fn pull_requests_list_by_reviewer(&self, user_id: &str) -> Result<Vec<PullRequest>>;
}
