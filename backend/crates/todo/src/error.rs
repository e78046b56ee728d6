//! Todo Error Types
//!
//! Todo-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.
//!
//! Scoped not-found conditions travel through sentinels (`Option` /
//! `bool`) inside the core; the `NotFound` variant exists only so the
//! boundary can turn a sentinel into a 404 response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Todo-specific result type alias
pub type TodoResult<T> = Result<T, TodoError>;

/// Todo-specific error variants
#[derive(Debug, Error)]
pub enum TodoError {
    /// Boundary-side mapping of a not-found sentinel
    #[error("{0}")]
    NotFound(&'static str),

    /// Missing or invalid bearer token
    #[error("Authentication required")]
    Unauthorized,

    /// Caller bug: a required argument was missing or invalid
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request collides with existing state, e.g. renaming a label
    /// onto a name a sibling already carries
    #[error("{0}")]
    Conflict(&'static str),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl TodoError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            TodoError::NotFound(_) => StatusCode::NOT_FOUND,
            TodoError::Unauthorized => StatusCode::UNAUTHORIZED,
            TodoError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            TodoError::Conflict(_) => StatusCode::CONFLICT,
            TodoError::Database(_) | TodoError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            TodoError::NotFound(_) => ErrorKind::NotFound,
            TodoError::Unauthorized => ErrorKind::Unauthorized,
            TodoError::InvalidArgument(_) => ErrorKind::BadRequest,
            TodoError::Conflict(_) => ErrorKind::Conflict,
            TodoError::Database(_) | TodoError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            TodoError::Database(e) => {
                tracing::error!(error = %e, "Todo database error");
            }
            TodoError::Internal(msg) => {
                tracing::error!(message = %msg, "Todo internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Todo error");
            }
        }
    }
}

impl IntoResponse for TodoError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for TodoError {
    fn from(err: AppError) -> Self {
        TodoError::Internal(err.to_string())
    }
}
