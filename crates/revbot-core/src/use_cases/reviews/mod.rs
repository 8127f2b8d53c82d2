pub(crate) mod reassign_reviewer;
pub(crate) mod select_reviewers;

pub use reassign_reviewer::{ReassignReviewerInterface, ReassignedReviewer};
pub use select_reviewers::{SelectReviewersInterface, MAX_REVIEWERS};

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    reassign_reviewer::MockReassignReviewerInterface,
    select_reviewers::MockSelectReviewersInterface,
};
