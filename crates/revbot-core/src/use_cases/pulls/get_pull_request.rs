use async_trait::async_trait;
use revbot_models::PullRequest;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetPullRequestInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = GetPullRequestInterface)]
pub(crate) struct GetPullRequest;

#[async_trait]
impl GetPullRequestInterface for GetPullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, pull_request_id: &str) -> Result<PullRequest> {
        ctx.db_service
            .pull_requests_get(pull_request_id)
            .await?
            .ok_or_else(|| DomainError::PullRequestNotFound {
                pull_request_id: pull_request_id.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use revbot_database_interface::DbService;

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn run() {
        let ctx = CoreContextTest::new();
        assert!(matches!(
            GetPullRequest.run(&ctx.as_context(), "pr-1").await,
            Err(DomainError::PullRequestNotFound { .. })
        ));

        ctx.create_team("backend", &[("u1", true), ("u2", true)])
            .await;
        ctx.db_service
            .pull_requests_create(PullRequest {
                id: "pr-1".into(),
                author_id: "u1".into(),
                assigned_reviewers: vec!["u2".into()],
                ..Default::default()
            })
            .await
            .unwrap();

        let pr = GetPullRequest
            .run(&ctx.as_context(), "pr-1")
            .await
            .unwrap();
        assert_eq!(pr.assigned_reviewers, vec!["u2"]);
    }
}
