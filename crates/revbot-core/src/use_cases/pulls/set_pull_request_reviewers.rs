use async_trait::async_trait;
use revbot_models::PullRequest;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SetPullRequestReviewersInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        reviewers: &[String],
    ) -> Result<PullRequest>;
}

#[derive(Component)]
#[shaku(interface = SetPullRequestReviewersInterface)]
pub(crate) struct SetPullRequestReviewers;

#[async_trait]
impl SetPullRequestReviewersInterface for SetPullRequestReviewers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        reviewers: &[String],
    ) -> Result<PullRequest> {
        let pr = ctx
            .db_service
            .pull_requests_get(pull_request_id)
            .await?
            .ok_or_else(|| DomainError::PullRequestNotFound {
                pull_request_id: pull_request_id.into(),
            })?;

        if pr.is_merged() {
            return Err(DomainError::PullRequestAlreadyMerged {
                pull_request_id: pull_request_id.into(),
            });
        }

        let author = ctx
            .db_service
            .users_get(&pr.author_id)
            .await?
            .ok_or_else(|| DomainError::AuthorNotFound {
                author_id: pr.author_id.clone(),
            })?;

        // Reviewers must be active members of the author's team.
        let mut unique_reviewers: Vec<String> = Vec::with_capacity(reviewers.len());
        for reviewer in reviewers {
            if unique_reviewers.contains(reviewer) {
                continue;
            }

            if *reviewer == pr.author_id {
                return Err(DomainError::AuthorCannotReview {
                    pull_request_id: pull_request_id.into(),
                    user_id: reviewer.clone(),
                });
            }

            let user = ctx.db_service.users_get(reviewer).await?.ok_or_else(|| {
                DomainError::UserNotFound {
                    user_id: reviewer.clone(),
                }
            })?;

            if !user.is_active || user.team_name != author.team_name {
                return Err(DomainError::IneligibleReviewer {
                    pull_request_id: pull_request_id.into(),
                    user_id: reviewer.clone(),
                });
            }

            unique_reviewers.push(reviewer.clone());
        }

        Ok(ctx
            .db_service
            .pull_requests_replace_reviewers(pull_request_id, &unique_reviewers)
            .await?)
    }
}
