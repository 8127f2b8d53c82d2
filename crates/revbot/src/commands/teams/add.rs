use std::str::FromStr;

use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::teams::CreateTeamInterface;
use revbot_models::TeamMember;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Team member argument, as `<user_id>:<username>[:inactive]`.
#[derive(Debug, Clone)]
pub(crate) struct MemberArg(TeamMember);

impl FromStr for MemberArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let parts: Vec<_> = s.split(':').collect();
        let is_active = match parts.get(2) {
            None => true,
            Some(&"inactive") => false,
            Some(&"active") => true,
            Some(other) => return Err(format!("unknown member flag '{other}'")),
        };

        match parts[..] {
            [user_id, username, ..] if parts.len() <= 3 && !user_id.is_empty() => {
                Ok(Self(TeamMember {
                    user_id: user_id.into(),
                    username: username.into(),
                    is_active,
                }))
            }
            _ => Err(format!(
                "invalid member '{s}', expected <user_id>:<username>[:inactive]"
            )),
        }
    }
}

/// Create a team with its members
#[derive(Parser)]
pub(crate) struct TeamAddCommand {
    /// Team name
    team_name: String,

    /// Team member (e.g. `u1:Alice` or `u2:Bob:inactive`)
    #[arg(long = "member")]
    members: Vec<MemberArg>,
}

#[async_trait]
impl Command for TeamAddCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let members: Vec<TeamMember> = self.members.into_iter().map(|m| m.0).collect();

        let create_team: &dyn CreateTeamInterface = ctx.core_module.resolve_ref();
        let team = create_team
            .run(&ctx.as_core_context(), &self.team_name, &members)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Team '{}' created with {} member(s).",
            team.team_name,
            team.members.len()
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;
    use revbot_database_interface::DbService;

    use super::*;
    use crate::testutils::{test_command, test_command_error, CommandContextTest};

    #[test]
    fn parse_member() {
        let member = MemberArg::from_str("u1:Alice").unwrap().0;
        assert_eq!(member.user_id, "u1");
        assert_eq!(member.username, "Alice");
        assert!(member.is_active);

        assert!(!MemberArg::from_str("u2:Bob:inactive").unwrap().0.is_active);
        assert!(MemberArg::from_str("u2").is_err());
        assert!(MemberArg::from_str(":Bob").is_err());
        assert!(MemberArg::from_str("u2:Bob:away").is_err());
    }

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command(
                ctx,
                &[
                    "teams",
                    "add",
                    "backend",
                    "--member",
                    "u1:Alice",
                    "--member",
                    "u2:Bob:inactive"
                ]
            )
            .await,
            "Team 'backend' created with 2 member(s).\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_existing() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        ctx.db_service.teams_create("backend").await?;

        assert_eq!(
            test_command_error(ctx, &["teams", "add", "backend"]).await,
            "Team already exists: backend"
        );

        Ok(())
    }
}
