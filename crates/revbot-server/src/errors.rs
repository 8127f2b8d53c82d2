//! Server errors.

use actix_http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use revbot_core::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Server error.
#[allow(missing_docs)]
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("I/O error,\n  caused by: {}", source)]
    IoError { source: std::io::Error },

    #[error("{source}")]
    DomainError { source: DomainError },

    #[error("{message}")]
    InvalidInput { message: String },

    #[error("{name} is required")]
    MissingParameter { name: String },

    #[error("Service unavailable,\n  caused by: {}", source)]
    Unavailable { source: DomainError },
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse<'a> {
    error: ErrorBody<'a>,
}

impl ServerError {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::DomainError { source } => source.code(),
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::MissingParameter { .. } => "MISSING_PARAM",
            Self::IoError { .. } | Self::Unavailable { .. } => "INTERNAL_ERROR",
        }
    }

    fn is_internal(&self) -> bool {
        self.code() == "INTERNAL_ERROR"
    }
}

impl From<DomainError> for ServerError {
    fn from(e: DomainError) -> Self {
        Self::DomainError { source: e }
    }
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::DomainError { source } => match source {
                DomainError::TeamAlreadyExists { .. } => StatusCode::BAD_REQUEST,
                DomainError::TeamNotFound { .. }
                | DomainError::UserNotFound { .. }
                | DomainError::AuthorNotFound { .. }
                | DomainError::PullRequestNotFound { .. }
                | DomainError::ReplacementUserNotFound { .. } => StatusCode::NOT_FOUND,
                DomainError::PullRequestAlreadyExists { .. }
                | DomainError::PullRequestAlreadyMerged { .. }
                | DomainError::ReviewerNotAssigned { .. }
                | DomainError::NoEligibleCandidate { .. }
                | DomainError::AuthorCannotReview { .. }
                | DomainError::IneligibleReviewer { .. } => StatusCode::CONFLICT,
                DomainError::DatabaseError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::InvalidInput { .. } | Self::MissingParameter { .. } => StatusCode::BAD_REQUEST,
            Self::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            Self::IoError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.is_internal() {
            tracing::error!(error = %self, message = "Internal server error");
            "internal server error".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message,
            },
        })
    }
}

/// Result alias for `ServerError`.
pub type Result<T> = core::result::Result<T, ServerError>;
