mod pull_request;
mod pull_request_status;
mod reviewer_assignment;
mod team;
mod user;

pub use pull_request::{PullRequest, PullRequestShort};
pub use pull_request_status::{PullRequestStatus, PullRequestStatusError};
pub use reviewer_assignment::ReviewerAssignment;
pub use team::{Team, TeamMember};
pub use user::User;
