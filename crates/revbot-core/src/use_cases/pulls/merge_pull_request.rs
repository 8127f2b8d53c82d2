use async_trait::async_trait;
use revbot_models::PullRequest;
use shaku::{Component, Interface};
use time::OffsetDateTime;
use tracing::info;

use crate::{CoreContext, DomainError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedPullRequest {
    pub pull_request: PullRequest,
    /// `false` when the pull request was already merged.
    pub newly_merged: bool,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait MergePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
    ) -> Result<MergedPullRequest>;
}

#[derive(Component)]
#[shaku(interface = MergePullRequestInterface)]
pub(crate) struct MergePullRequest;

#[async_trait]
impl MergePullRequestInterface for MergePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
    ) -> Result<MergedPullRequest> {
        let newly_merged = ctx
            .db_service
            .pull_requests_merge(pull_request_id, OffsetDateTime::now_utc())
            .await
            .map_err(|e| match e {
                revbot_database_interface::DatabaseError::UnknownPullRequest(_) => {
                    DomainError::PullRequestNotFound {
                        pull_request_id: pull_request_id.into(),
                    }
                }
                e => e.into(),
            })?;

        if newly_merged {
            info!(
                pull_request_id = pull_request_id,
                message = "Pull request merged"
            );
        }

        let pull_request = ctx
            .db_service
            .pull_requests_get(pull_request_id)
            .await?
            .ok_or_else(|| DomainError::PullRequestNotFound {
                pull_request_id: pull_request_id.into(),
            })?;

        Ok(MergedPullRequest {
            pull_request,
            newly_merged,
        })
    }
}
