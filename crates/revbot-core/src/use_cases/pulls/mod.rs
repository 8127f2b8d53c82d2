pub(crate) mod create_pull_request;
pub(crate) mod get_pull_request;
pub(crate) mod merge_pull_request;
pub(crate) mod set_pull_request_reviewers;

pub use create_pull_request::CreatePullRequestInterface;
pub use get_pull_request::GetPullRequestInterface;
pub use merge_pull_request::{MergePullRequestInterface, MergedPullRequest};
pub use set_pull_request_reviewers::SetPullRequestReviewersInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_pull_request::MockCreatePullRequestInterface,
    get_pull_request::MockGetPullRequestInterface,
    merge_pull_request::MockMergePullRequestInterface,
    set_pull_request_reviewers::MockSetPullRequestReviewersInterface,
};
