use async_trait::async_trait;
use clap::Parser;
use revbot_core::use_cases::pulls::MergePullRequestInterface;
use shaku::HasComponent;

use crate::{
    commands::{Command, CommandContext},
    Result,
};

/// Mark a pull request as merged
#[derive(Parser)]
pub(crate) struct PullRequestMergeCommand {
    /// Pull request ID
    pull_request_id: String,
}

#[async_trait]
impl Command for PullRequestMergeCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        let merge_pull_request: &dyn MergePullRequestInterface = ctx.core_module.resolve_ref();
        let merged = merge_pull_request
            .run(&ctx.as_core_context(), &self.pull_request_id)
            .await?;

        if merged.newly_merged {
            writeln!(
                ctx.writer.write().await,
                "Pull request '{}' merged.",
                merged.pull_request.id
            )?;
        } else {
            writeln!(
                ctx.writer.write().await,
                "Pull request '{}' was already merged.",
                merged.pull_request.id
            )?;
        }

        Ok(())
    }
}
