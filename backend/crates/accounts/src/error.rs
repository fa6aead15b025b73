//! Accounts Error Types
//!
//! This module provides accounts-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Accounts-specific result type alias
pub type AccountsResult<T> = Result<T, AccountsError>;

/// Accounts-specific error variants
#[derive(Debug, Error)]
pub enum AccountsError {
    /// User not found
    #[error("User not found")]
    UserNotFound,

    /// Profile not found
    #[error("Profile not found")]
    ProfileNotFound,

    /// User name already exists
    #[error("Username already exists")]
    UserNameTaken,

    /// Invalid credentials (unknown user or wrong password)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Session not found or expired
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Bearer token missing, malformed, expired, or of the wrong kind
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// The two password fields did not match
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Password validation error
    #[error("Password validation failed: {0}")]
    PasswordValidation(String),

    /// Input validation error (username, email, profile fields)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Media storage error
    #[error("Media error: {0}")]
    Media(#[from] platform::media::MediaError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AccountsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AccountsError::UserNotFound | AccountsError::ProfileNotFound => StatusCode::NOT_FOUND,
            // Duplicate usernames surface as a validation failure on the wire
            AccountsError::UserNameTaken => StatusCode::BAD_REQUEST,
            AccountsError::InvalidCredentials
            | AccountsError::SessionInvalid
            | AccountsError::TokenInvalid => StatusCode::UNAUTHORIZED,
            AccountsError::PasswordMismatch
            | AccountsError::PasswordValidation(_)
            | AccountsError::Validation(_) => StatusCode::BAD_REQUEST,
            AccountsError::Media(e) => match e {
                platform::media::MediaError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            AccountsError::Database(_) | AccountsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AccountsError::UserNotFound | AccountsError::ProfileNotFound => ErrorKind::NotFound,
            AccountsError::UserNameTaken => ErrorKind::BadRequest,
            AccountsError::InvalidCredentials
            | AccountsError::SessionInvalid
            | AccountsError::TokenInvalid => ErrorKind::Unauthorized,
            AccountsError::PasswordMismatch
            | AccountsError::PasswordValidation(_)
            | AccountsError::Validation(_) => ErrorKind::BadRequest,
            AccountsError::Media(e) => match e {
                platform::media::MediaError::Io(_) => ErrorKind::InternalServerError,
                _ => ErrorKind::BadRequest,
            },
            AccountsError::Database(_) | AccountsError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AccountsError::Database(e) => {
                tracing::error!(error = %e, "Accounts database error");
            }
            AccountsError::Internal(msg) => {
                tracing::error!(message = %msg, "Accounts internal error");
            }
            AccountsError::Media(e) => {
                tracing::error!(error = %e, "Media storage error");
            }
            AccountsError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Accounts error");
            }
        }
    }
}

impl IntoResponse for AccountsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AccountsError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest | ErrorKind::UnprocessableEntity => {
                AccountsError::Validation(err.message().to_string())
            }
            _ => AccountsError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AccountsError::UserNameTaken.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AccountsError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AccountsError::TokenInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AccountsError::SessionInvalid.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AccountsError::UserNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AccountsError::PasswordMismatch.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AccountsError::Internal("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_kind_matches_status() {
        let errors = [
            AccountsError::UserNameTaken,
            AccountsError::InvalidCredentials,
            AccountsError::UserNotFound,
            AccountsError::PasswordMismatch,
            AccountsError::Internal("x".into()),
        ];
        for err in errors {
            assert_eq!(err.kind().status_code(), err.status_code().as_u16());
        }
    }
}
