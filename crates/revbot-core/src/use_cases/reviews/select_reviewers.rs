use async_trait::async_trait;
use shaku::{Component, Interface};

use crate::{CoreContext, Result};

/// Maximum amount of reviewers picked for a new pull request.
pub const MAX_REVIEWERS: usize = 2;

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait SelectReviewersInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        author_id: &str,
    ) -> Result<Vec<String>>;
}

#[derive(Component)]
#[shaku(interface = SelectReviewersInterface)]
pub(crate) struct SelectReviewers;

#[async_trait]
impl SelectReviewersInterface for SelectReviewers {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        author_id: &str,
    ) -> Result<Vec<String>> {
        let candidates: Vec<_> = ctx
            .db_service
            .users_list_active_in_team(team_name, author_id)
            .await?
            .into_iter()
            .map(|u| u.user_id)
            .filter(|id| id != author_id)
            .collect();

        Ok(ctx.random.choose_multiple(&candidates, MAX_REVIEWERS))
    }
}
