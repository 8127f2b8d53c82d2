use async_trait::async_trait;
use clap::{Parser, Subcommand};

use super::{Command, CommandContext};
use crate::Result;

mod create;
mod merge;
mod reassign;
mod set_reviewers;
mod show;

use self::{
    create::PullRequestCreateCommand, merge::PullRequestMergeCommand,
    reassign::PullRequestReassignCommand, set_reviewers::PullRequestSetReviewersCommand,
    show::PullRequestShowCommand,
};

/// Manage pull requests
#[derive(Parser)]
pub(crate) struct PullRequestCommand {
    #[clap(subcommand)]
    inner: PullRequestSubCommand,
}

#[async_trait]
impl Command for PullRequestCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        self.inner.execute(ctx).await
    }
}

#[derive(Subcommand)]
pub(crate) enum PullRequestSubCommand {
    Create(PullRequestCreateCommand),
    Show(PullRequestShowCommand),
    Merge(PullRequestMergeCommand),
    Reassign(PullRequestReassignCommand),
    SetReviewers(PullRequestSetReviewersCommand),
}

#[async_trait]
impl Command for PullRequestSubCommand {
    async fn execute(self, ctx: CommandContext) -> Result<()> {
        match self {
            Self::Create(sub) => sub.execute(ctx).await,
            Self::Show(sub) => sub.execute(ctx).await,
            Self::Merge(sub) => sub.execute(ctx).await,
            Self::Reassign(sub) => sub.execute(ctx).await,
            Self::SetReviewers(sub) => sub.execute(ctx).await,
        }
    }
}

fn format_reviewers(reviewers: &[String]) -> String {
    if reviewers.is_empty() {
        "none".into()
    } else {
        reviewers.join(", ")
    }
}
