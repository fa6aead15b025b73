//! Posts Error Types
//!
//! Posts-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Posts-specific result type alias
pub type PostsResult<T> = Result<T, PostsError>;

/// Posts-specific error variants
#[derive(Debug, Error)]
pub enum PostsError {
    /// Post not found
    #[error("Post not found")]
    PostNotFound,

    /// Image not found
    #[error("Image not found")]
    ImageNotFound,

    /// Acting on another user's post
    #[error("Post belongs to another user")]
    NotOwner,

    /// Input validation error (title/text/comment bounds)
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

impl PostsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            PostsError::PostNotFound | PostsError::ImageNotFound => StatusCode::NOT_FOUND,
            // Ownership rejections ride the 400 the original API returned
            PostsError::NotOwner => StatusCode::BAD_REQUEST,
            PostsError::Validation(_) => StatusCode::BAD_REQUEST,
            PostsError::Media(e) => match e {
                platform::media::MediaError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
                _ => StatusCode::BAD_REQUEST,
            },
            PostsError::Database(_) | PostsError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            PostsError::PostNotFound | PostsError::ImageNotFound => ErrorKind::NotFound,
            PostsError::NotOwner => ErrorKind::BadRequest,
            PostsError::Validation(_) => ErrorKind::BadRequest,
            PostsError::Media(e) => match e {
                platform::media::MediaError::Io(_) => ErrorKind::InternalServerError,
                _ => ErrorKind::BadRequest,
            },
            PostsError::Database(_) | PostsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            PostsError::Database(e) => {
                tracing::error!(error = %e, "Posts database error");
            }
            PostsError::Internal(msg) => {
                tracing::error!(message = %msg, "Posts internal error");
            }
            PostsError::Media(e) => {
                tracing::error!(error = %e, "Media storage error");
            }
            PostsError::NotOwner => {
                tracing::warn!("Rejected action on another user's post");
            }
            _ => {
                tracing::debug!(error = %self, "Posts error");
            }
        }
    }
}

impl IntoResponse for PostsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
