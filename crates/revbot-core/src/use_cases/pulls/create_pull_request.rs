use async_trait::async_trait;
use revbot_database_interface::DatabaseError;
use revbot_models::{PullRequest, PullRequestStatus};
use shaku::{Component, HasComponent, Interface};
use time::OffsetDateTime;

use crate::{
    use_cases::reviews::SelectReviewersInterface, CoreContext, DomainError, Result,
};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreatePullRequestInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        title: &str,
        author_id: &str,
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = CreatePullRequestInterface)]
pub(crate) struct CreatePullRequest;

#[async_trait]
impl CreatePullRequestInterface for CreatePullRequest {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        title: &str,
        author_id: &str,
    ) -> Result<PullRequest> {
        if ctx.db_service.pull_requests_exists(pull_request_id).await? {
            return Err(DomainError::PullRequestAlreadyExists {
                pull_request_id: pull_request_id.into(),
            });
        }

        let author = ctx.db_service.users_get(author_id).await?.ok_or_else(|| {
            DomainError::AuthorNotFound {
                author_id: author_id.into(),
            }
        })?;

        let select_reviewers: &dyn SelectReviewersInterface = ctx.core_module.resolve_ref();
        let reviewers = select_reviewers
            .run(ctx, &author.team_name, &author.user_id)
            .await?;

        ctx.db_service
            .pull_requests_create(PullRequest {
                id: pull_request_id.into(),
                title: title.into(),
                author_id: author.user_id,
                status: PullRequestStatus::Open,
                assigned_reviewers: reviewers,
                created_at: Some(OffsetDateTime::now_utc()),
                merged_at: None,
            })
            .await
            .map_err(|e| match e {
                DatabaseError::DuplicatePullRequest(_) => DomainError::PullRequestAlreadyExists {
                    pull_request_id: pull_request_id.into(),
                },
                e => e.into(),
            })
    }
}
