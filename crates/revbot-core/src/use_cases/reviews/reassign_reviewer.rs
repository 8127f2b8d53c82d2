use async_trait::async_trait;
use revbot_database_interface::DatabaseError;
use revbot_models::PullRequest;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReassignedReviewer {
    pub pull_request: PullRequest,
    pub replaced_by: String,
}

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ReassignReviewerInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> Result<ReassignedReviewer>;
}

#[derive(Component)]
#[shaku(interface = ReassignReviewerInterface)]
pub(crate) struct ReassignReviewer;

#[async_trait]
impl ReassignReviewerInterface for ReassignReviewer {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        pull_request_id: &str,
        old_user_id: &str,
    ) -> Result<ReassignedReviewer> {
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

        if !pr.has_reviewer(old_user_id) {
            return Err(DomainError::ReviewerNotAssigned {
                pull_request_id: pull_request_id.into(),
                user_id: old_user_id.into(),
            });
        }

        let old_reviewer = ctx.db_service.users_get(old_user_id).await?.ok_or_else(|| {
            DomainError::ReplacementUserNotFound {
                user_id: old_user_id.into(),
            }
        })?;

        // Current reviewers include the one being replaced.
        let candidates: Vec<_> = ctx
            .db_service
            .users_list_active_in_team(&old_reviewer.team_name, &pr.author_id)
            .await?
            .into_iter()
            .map(|u| u.user_id)
            .filter(|id| *id != pr.author_id && !pr.has_reviewer(id))
            .collect();

        let replaced_by =
            ctx.random
                .choose(&candidates)
                .ok_or_else(|| DomainError::NoEligibleCandidate {
                    pull_request_id: pull_request_id.into(),
                })?;

        let pull_request = ctx
            .db_service
            .pull_requests_replace_reviewer(pull_request_id, old_user_id, &replaced_by)
            .await
            .map_err(|e| match e {
                DatabaseError::UnknownAssignment(_, _) => DomainError::ReviewerNotAssigned {
                    pull_request_id: pull_request_id.into(),
                    user_id: old_user_id.into(),
                },
                e => e.into(),
            })?;

        Ok(ReassignedReviewer {
            pull_request,
            replaced_by,
        })
    }
}
