use async_trait::async_trait;
use revbot_models::Team;
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait GetTeamInterface: Interface {
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = GetTeamInterface)]
pub(crate) struct GetTeam;

#[async_trait]
impl GetTeamInterface for GetTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(&self, ctx: &CoreContext<'a>, team_name: &str) -> Result<Team> {
        ctx.db_service
            .teams_get_with_members(team_name)
            .await?
            .ok_or_else(|| DomainError::TeamNotFound {
                team_name: team_name.into(),
            })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::context::tests::CoreContextTest;

    #[tokio::test]
    async fn run() {
        let ctx = CoreContextTest::new();
        assert!(matches!(
            GetTeam.run(&ctx.as_context(), "backend").await,
            Err(DomainError::TeamNotFound { .. })
        ));

        ctx.create_team("backend", &[("u1", true), ("u2", false)])
            .await;

        let team = GetTeam.run(&ctx.as_context(), "backend").await.unwrap();
        assert_eq!(team.team_name, "backend");
        assert_eq!(
            team.members
                .iter()
                .map(|m| (m.user_id.as_str(), m.is_active))
                .collect::<Vec<_>>(),
            vec![("u1", true), ("u2", false)]
        );
    }
}
