use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Unknown team '{0}'")]
    UnknownTeam(String),

    #[error("Unknown user '{0}'")]
    UnknownUser(String),

    #[error("Unknown pull request '{0}'")]
    UnknownPullRequest(String),

    #[error("Pull request '{0}' is merged")]
    PullRequestMerged(String),

    #[error("User '{1}' is not assigned to pull request '{0}'")]
    UnknownAssignment(String, String),

    #[error("Team '{0}' already exists")]
    DuplicateTeam(String),

    #[error("Pull request '{0}' already exists")]
    DuplicatePullRequest(String),

    #[error("User '{1}' is already assigned to pull request '{0}'")]
    DuplicateAssignment(String, String),

    #[error(transparent)]
    ImplementationError {
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

pub type Result<T, E = DatabaseError> = core::result::Result<T, E>;
