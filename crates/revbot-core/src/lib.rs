//! Reviewer assignment engine.

#![warn(clippy::all)]
#![allow(clippy::new_without_default)]

mod context;
pub mod errors;
mod random;
pub mod use_cases;

#[cfg(any(test, feature = "testkit"))]
pub use context::tests::CoreContextTest;
pub use context::CoreContext;
pub use errors::{DomainError, Result};
pub use random::RandomSource;
use shaku::module;
use use_cases::{
    health::check_health::CheckHealth,
    pulls::{
        create_pull_request::CreatePullRequest, get_pull_request::GetPullRequest,
        merge_pull_request::MergePullRequest,
        set_pull_request_reviewers::SetPullRequestReviewers,
    },
    reviews::{reassign_reviewer::ReassignReviewer, select_reviewers::SelectReviewers},
    teams::{create_team::CreateTeam, get_team::GetTeam},
    users::{list_user_reviews::ListUserReviews, set_user_active::SetUserActive},
};

module! {
    pub CoreModule {
        components = [
            CheckHealth, CreatePullRequest, GetPullRequest, MergePullRequest,
            SetPullRequestReviewers, ReassignReviewer, SelectReviewers,
            CreateTeam, GetTeam, ListUserReviews, SetUserActive
        ],
        providers = []
    }
}
