use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::users::ListUserReviewsInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// List pull requests a user has to review
#[derive(Parser)]
pub(crate) struct UserReviewsCommand {
    /// User ID
    user_id: String,
}

#[async_trait]
impl Command for UserReviewsCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let list_user_reviews: &dyn ListUserReviewsInterface = ctx.core_module.resolve_ref();
        let pull_requests = list_user_reviews
            .run(&ctx.as_core_context(), &self.user_id)
            .await?;

        if pull_requests.is_empty() {
            writeln!(
                ctx.writer.write().await,
                "No pull request to review for user '{}'.",
                self.user_id
            )?;
        } else {
            writeln!(
                ctx.writer.write().await,
                "Pull requests to review for user '{}':",
                self.user_id
            )?;
            for pr in pull_requests {
                writeln!(
                    ctx.writer.write().await,
                    "- {}: {} ({})",
                    pr.id,
                    pr.title,
                    pr.status
                )?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;
    use revbot_database_interface::DbService;
    use revbot_models::PullRequest;

    use crate::testutils::{test_command, CommandContextTest};

    #[tokio::test]
    async fn run_empty() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();

        assert_eq!(
            test_command(ctx, &["users", "reviews", "u2"]).await,
            "No pull request to review for user 'u2'.\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        ctx.create_team("backend", &[("u1", true), ("u2", true)])
            .await;
        for id in ["pr-2", "pr-1"] {
            ctx.db_service
                .pull_requests_create(PullRequest {
                    id: id.into(),
                    title: format!("Title {id}"),
                    author_id: "u1".into(),
                    assigned_reviewers: vec!["u2".into()],
                    ..Default::default()
                })
                .await?;
        }

        assert_eq!(
            test_command(ctx, &["users", "reviews", "u2"]).await,
            "Pull requests to review for user 'u2':\n- pr-1: Title pr-1 (OPEN)\n- pr-2: Title pr-2 (OPEN)\n"
        );

        Ok(())
    }
}
