use async_trait::async_trait;
use clap::{ArgAction, Parser};
use revbot_core::use_cases::users::SetUserActiveInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Set whether a user can be picked as reviewer
#[derive(Parser)]
pub(crate) struct UserSetActiveCommand {
    /// User ID
    user_id: String,

    /// Active flag (`true` or `false`)
    #[arg(action = ArgAction::Set)]
    is_active: bool,
}

#[async_trait]
impl Command for UserSetActiveCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let set_user_active: &dyn SetUserActiveInterface = ctx.core_module.resolve_ref();
        let user = set_user_active
            .run(&ctx.as_core_context(), &self.user_id, self.is_active)
            .await?;

        writeln!(
            ctx.writer.write().await,
            "User '{}' is now {}.",
            user.user_id,
            if user.is_active { "active" } else { "inactive" }
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;

    use crate::testutils::{test_command, test_command_error, CommandContextTest};

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        ctx.create_team("backend", &[("u1", true)]).await;

        assert_eq!(
            test_command(ctx, &["users", "set-active", "u1", "false"]).await,
            "User 'u1' is now inactive.\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_unknown() {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command_error(ctx, &["users", "set-active", "u1", "true"]).await,
            "User not found: u1"
        );
    }
}
