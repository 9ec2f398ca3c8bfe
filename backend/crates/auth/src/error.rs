//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.
//!
//! The first three variants are expected rejections: they end up in an
//! [`Outcome`](crate::application::Outcome) and never abort a request.
//! The store and internal variants are hard failures.

use std::path::PathBuf;

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::application::outcome::Rejection;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Empty username (after trimming) or empty password on register
    #[error("Username and password are required.")]
    Validation,

    /// Username already present in the store
    #[error("That username is already taken.")]
    DuplicateUser,

    /// Unknown username or wrong password. One message for both.
    #[error("Invalid username or password.")]
    InvalidCredentials,

    /// The credential store exists but cannot be read or written
    #[error("Credential store I/O failed for {}: {source}", .path.display())]
    StoreIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn store_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        AuthError::StoreIo {
            path: path.into(),
            source,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation => ErrorKind::BadRequest,
            AuthError::DuplicateUser => ErrorKind::Conflict,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::StoreIo { .. } | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// The user-facing rejection this error represents, if it is one
    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            AuthError::Validation => Some(Rejection::Validation),
            AuthError::DuplicateUser => Some(Rejection::DuplicateUser),
            AuthError::InvalidCredentials => Some(Rejection::InvalidCredentials),
            AuthError::StoreIo { .. } | AuthError::Internal(_) => None,
        }
    }

    /// Convert to AppError
    ///
    /// Server errors get a generic message. Paths and OS errors travel only
    /// as the source, for logs.
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::StoreIo { source, .. } => AppError::internal("Credential store unavailable")
                .with_action("Please try again later")
                .with_source(source),
            AuthError::Internal(_) => AppError::internal("Internal server error"),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::StoreIo { path, source } => {
                tracing::error!(path = %path.display(), error = %source, "Credential store I/O error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::DuplicateUser => {
                tracing::warn!("Registration attempt for existing user name");
            }
            AuthError::Validation => {
                tracing::debug!(error = %self, "Auth validation error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task failed: {err}"))
    }
}
