use async_trait::async_trait;
use revbot_models::PullRequestShort;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait ListUserReviewsInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, user_id: &str)
        -> Result<Vec<PullRequestShort>>;
}

#[derive(Component)]
#[shaku(interface = ListUserReviewsInterface)]
pub(crate) struct ListUserReviews;

#[async_trait]
impl ListUserReviewsInterface for ListUserReviews {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        user_id: &str,
    ) -> Result<Vec<PullRequestShort>> {
        Ok(ctx
            .db_service
            .pull_requests_list_by_reviewer(user_id)
            .await?
            .iter()
            .map(|pr| pr.to_short())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use revbot_database_interface::DbService;
    use revbot_models::{PullRequest, PullRequestStatus};

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn run() {
        let ctx = CoreContextTest::new();
        assert_eq!(
            ListUserReviews
                .run(&ctx.as_context(), "unknown")
                .await
                .unwrap(),
            vec![]
        );

        ctx.create_team("backend", &[("u1", true), ("u2", true), ("u3", true)])
            .await;
        for (id, reviewers) in [
            ("pr-2", vec!["u2"]),
            ("pr-1", vec!["u2", "u3"]),
            ("pr-3", vec!["u3"]),
        ] {
            ctx.db_service
                .pull_requests_create(PullRequest {
                    id: id.into(),
                    title: format!("Title {id}"),
                    author_id: "u1".into(),
                    assigned_reviewers: reviewers.into_iter().map(Into::into).collect(),
                    ..Default::default()
                })
                .await
                .unwrap();
        }

        assert_eq!(
            ListUserReviews
                .run(&ctx.as_context(), "u2")
                .await
                .unwrap(),
            vec![
                PullRequestShort {
                    id: "pr-1".into(),
                    title: "Title pr-1".into(),
                    author_id: "u1".into(),
                    status: PullRequestStatus::Open,
                },
                PullRequestShort {
                    id: "pr-2".into(),
                    title: "Title pr-2".into(),
                    author_id: "u1".into(),
                    status: PullRequestStatus::Open,
                }
            ]
        );
    }
}
