//! Domain errors.

use thiserror::Error;

/// Domain error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Team already exists: {team_name}")]
    TeamAlreadyExists { team_name: String },

    #[error("Team not found: {team_name}")]
    TeamNotFound { team_name: String },

    #[error("User not found: {user_id}")]
    UserNotFound { user_id: String },

    #[error("Author not found: {author_id}")]
    AuthorNotFound { author_id: String },

    #[error("Pull request already exists: {pull_request_id}")]
    PullRequestAlreadyExists { pull_request_id: String },

    #[error("Pull request not found: {pull_request_id}")]
    PullRequestNotFound { pull_request_id: String },

    #[error("Cannot modify merged pull request: {pull_request_id}")]
    PullRequestAlreadyMerged { pull_request_id: String },

    #[error("Reviewer {user_id} is not assigned to pull request {pull_request_id}")]
    ReviewerNotAssigned {
        pull_request_id: String,
        user_id: String,
    },

    #[error("Reviewer to replace not found: {user_id}")]
    ReplacementUserNotFound { user_id: String },

    #[error("No active replacement candidate for pull request {pull_request_id}")]
    NoEligibleCandidate { pull_request_id: String },

    #[error("Author {user_id} cannot review pull request {pull_request_id}")]
    AuthorCannotReview {
        pull_request_id: String,
        user_id: String,
    },

    #[error("User {user_id} cannot review pull request {pull_request_id}: inactive or outside the author's team")]
    IneligibleReviewer {
        pull_request_id: String,
        user_id: String,
    },

    /// Wraps [`revbot_database_interface::DatabaseError`].
    #[error("Database error: {source}")]
    DatabaseError {
        source: revbot_database_interface::DatabaseError,
    },
}

impl DomainError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::TeamAlreadyExists { .. } => "TEAM_EXISTS",
            Self::PullRequestAlreadyExists { .. } => "PR_EXISTS",
            Self::TeamNotFound { .. }
            | Self::UserNotFound { .. }
            | Self::AuthorNotFound { .. }
            | Self::PullRequestNotFound { .. }
            | Self::ReplacementUserNotFound { .. } => "NOT_FOUND",
            Self::PullRequestAlreadyMerged { .. } => "PR_MERGED",
            Self::ReviewerNotAssigned { .. } => "NOT_ASSIGNED",
            Self::NoEligibleCandidate { .. } => "NO_CANDIDATE",
            Self::AuthorCannotReview { .. } | Self::IneligibleReviewer { .. } => "INVALID_REVIEWER",
            Self::DatabaseError { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<revbot_database_interface::DatabaseError> for DomainError {
    fn from(e: revbot_database_interface::DatabaseError) -> Self {
        match e {
            revbot_database_interface::DatabaseError::PullRequestMerged(pull_request_id) => {
                Self::PullRequestAlreadyMerged { pull_request_id }
            }
            e => Self::DatabaseError { source: e },
        }
    }
}

/// Result alias for `DomainError`.
pub type Result<T> = core::result::Result<T, DomainError>;
