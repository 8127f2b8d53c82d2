use async_trait::async_trait;
use revbot_database_interface::DatabaseError;
use revbot_models::{Team, TeamMember};
use shaku::{Component, Interface};

use crate::{CoreContext, DomainError, Result};

#[cfg_attr(any(test, feature = "testkit"), mockall::automock)]
#[async_trait]
pub trait CreateTeamInterface: Interface {
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        members: &[TeamMember],
    ) -> Result<Team>;
}

#[derive(Component)]
#[shaku(interface = CreateTeamInterface)]
pub(crate) struct CreateTeam;

#[async_trait]
impl CreateTeamInterface for CreateTeam {
    #[tracing::instrument(skip(self, ctx), ret)]
    async fn run<'a>(
        &self,
        ctx: &CoreContext<'a>,
        team_name: &str,
        members: &[TeamMember],
    ) -> Result<Team> {
        if ctx.db_service.teams_exists(team_name).await? {
            return Err(DomainError::TeamAlreadyExists {
                team_name: team_name.into(),
            });
        }

        ctx.db_service
            .teams_create(team_name)
            .await
            .map_err(|e| match e {
                DatabaseError::DuplicateTeam(_) => DomainError::TeamAlreadyExists {
                    team_name: team_name.into(),
                },
                e => e.into(),
            })?;

        for member in members {
            ctx.db_service
                .users_upsert(member.to_user(team_name))
                .await?;
        }

        Ok(ctx
            .db_service
            .teams_get_with_members_expect(team_name)
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use revbot_database_interface::DbService;

    use super::*;
    use crate::context::tests::CoreContextTest;

    fn member(user_id: &str, is_active: bool) -> TeamMember {
        TeamMember {
            user_id: user_id.into(),
            username: format!("name-{user_id}"),
            is_active,
        }
    }

    #[tokio::test]
    async fn run() {
        let ctx = CoreContextTest::new();

        let team = CreateTeam
            .run(
                &ctx.as_context(),
                "backend",
                &[member("u2", false), member("u1", true)],
            )
            .await
            .unwrap();

        assert_eq!(
            team,
            Team {
                team_name: "backend".into(),
                members: vec![member("u1", true), member("u2", false)]
            }
        );
        assert_eq!(
            ctx.db_service.users_get_expect("u2").await.unwrap().team_name,
            "backend"
        );
    }

    #[tokio::test]
    async fn moves_existing_users() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u1", true), ("u2", true)])
            .await;

        let team = CreateTeam
            .run(&ctx.as_context(), "payments", &[member("u2", true)])
            .await
            .unwrap();

        assert_eq!(team.members, vec![member("u2", true)]);
        assert_eq!(
            ctx.db_service
                .teams_get_with_members_expect("backend")
                .await
                .unwrap()
                .members,
            vec![member("u1", true)]
        );
    }

    #[tokio::test]
    async fn already_exists() {
        let ctx = CoreContextTest::new();
        ctx.create_team("backend", &[("u1", true)]).await;

        assert!(matches!(
            CreateTeam
                .run(&ctx.as_context(), "backend", &[member("u3", true)])
                .await,
            Err(DomainError::TeamAlreadyExists { .. })
        ));
        assert!(!ctx.db_service.users_exists("u3").await.unwrap());
    }
}
