use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::pulls::SetPullRequestReviewersInterface;
use shaku::HasComponent;

use super::format_reviewers;
use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Replace the whole reviewer set of an open pull request
#[derive(Parser)]
pub(crate) struct PullRequestSetReviewersCommand {
    /// Pull request ID
    pull_request_id: String,
    /// Reviewer user IDs
    reviewers: Vec<String>,
}

#[async_trait]
impl Command for PullRequestSetReviewersCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let set_reviewers: &dyn SetPullRequestReviewersInterface = ctx.core_module.resolve_ref();
        let pr = set_reviewers
            .run(
                &ctx.as_core_context(),
                &self.pull_request_id,
                &self.reviewers,
            )
            .await?;

        writeln!(
            ctx.writer.write().await,
            "Reviewers of pull request '{}' set to: {}.",
            pr.id,
            format_reviewers(&pr.assigned_reviewers)
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use pretty_assertions::assert_eq;
    use revbot_database_interface::DbService;
    use revbot_models::PullRequest;

    use crate::testutils::{test_command, test_command_error, CommandContextTest};

    async fn setup(ctx: &CommandContextTest) -> Result<(), Box<dyn Error>> {
        ctx.create_team("backend", &[("u1", true), ("u2", true), ("u3", true)])
            .await;
        ctx.db_service
            .pull_requests_create(PullRequest {
                id: "pr-1".into(),
                title: "Add search".into(),
                author_id: "u1".into(),
                assigned_reviewers: vec!["u2".into()],
                ..Default::default()
            })
            .await?;

        Ok(())
    }

    #[tokio::test]
    async fn run() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        setup(&ctx).await?;

        assert_eq!(
            test_command(ctx, &["pull-requests", "set-reviewers", "pr-1", "u3"]).await,
            "Reviewers of pull request 'pr-1' set to: u3.\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_clear() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        setup(&ctx).await?;

        assert_eq!(
            test_command(ctx, &["pull-requests", "set-reviewers", "pr-1"]).await,
            "Reviewers of pull request 'pr-1' set to: none.\n"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_author() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        setup(&ctx).await?;

        assert_eq!(
            test_command_error(ctx, &["pull-requests", "set-reviewers", "pr-1", "u1"]).await,
            "Author u1 cannot review pull request pr-1"
        );

        Ok(())
    }

    #[tokio::test]
    async fn run_inactive() -> Result<(), Box<dyn Error>> {
        let ctx = CommandContextTest::new();
        setup(&ctx).await?;
        ctx.create_team("payments", &[("p1", false)]).await;

        assert_eq!(
            test_command_error(ctx, &["pull-requests", "set-reviewers", "pr-1", "p1"]).await,
            "User p1 cannot review pull request pr-1: inactive or outside the author's team"
        );

        Ok(())
    }
}
