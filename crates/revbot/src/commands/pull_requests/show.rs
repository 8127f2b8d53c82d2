use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::pulls::GetPullRequestInterface;
use shaku::HasComponent;

use super::format_reviewers;
use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Show pull request info
#[derive(Parser)]
pub(crate) struct PullRequestShowCommand {
    /// Pull request ID
    pull_request_id: String,
}

#[async_trait]
impl Command for PullRequestShowCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let get_pull_request: &dyn GetPullRequestInterface = ctx.core_module.resolve_ref();
        let pr = get_pull_request
            .run(&ctx.as_core_context(), &self.pull_request_id)
            .await?;

        let mut writer = ctx.writer.write().await;
        writeln!(writer, "Pull request '{}': {}", pr.id, pr.title)?;
        writeln!(writer, "  Author: {}", pr.author_id)?;
        writeln!(writer, "  Status: {}", pr.status)?;
        writeln!(
            writer,
            "  Reviewers: {}",
            format_reviewers(&pr.assigned_reviewers)
        )?;
        if let Some(merged_at) = pr.merged_at {
            writeln!(writer, "  Merged at: {}", merged_at)?;
        }

        Ok(())
    }
}
