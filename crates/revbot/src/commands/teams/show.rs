use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::teams::GetTeamInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show team members
#[derive(Parser)]
pub(crate) struct TeamShowCommand {
    /// Team name
    team_name: String,
}

#[async_trait]
impl Command for TeamShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_team: &dyn GetTeamInterface = ctx.core_module.resolve_ref();
        let team = get_team
            .run(&ctx.as_core_context(), &self.team_name)
            .await?;

        if team.members.is_empty() {
            writeln!(
                ctx.writer.write().await,
                "Team '{}' has no member.",
                team.team_name
            )?;
        } else {
            writeln!(ctx.writer.write().await, "Team '{}':", team.team_name)?;
            for member in team.members {
                let suffix = if member.is_active { "" } else { " [inactive]" };
                writeln!(
                    ctx.writer.write().await,
                    "- {} ({}){}",
                    member.user_id,
                    member.username,
                    suffix
                )?;
            }
        }

        Ok(())
    }
}
