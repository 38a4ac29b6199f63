//! Error types for Shelf server

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::repository::storage::StorageError;

/// Stable error codes reported alongside the HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    StorageFailure = 3,
    NoSuchStudent = 4,
    NoSuchBook = 5,
    BookNotAvailable = 7,
    MaxBorrowsReached = 11,
    NoActiveBorrow = 13,
    BadValue = 18,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    BookNotFound(String),

    #[error("{0}")]
    StudentNotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    LimitExceeded(String),

    #[error("{0}")]
    InvalidState(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn book_not_found() -> Self {
        AppError::BookNotFound("Book not found".to_string())
    }

    pub fn student_not_found() -> Self {
        AppError::StudentNotFound("Student not found".to_string())
    }

    /// HTTP status and error code for this error
    pub fn status(&self) -> (StatusCode, ErrorCode) {
        match self {
            AppError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::BadValue),
            AppError::BookNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchBook),
            AppError::StudentNotFound(_) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchStudent),
            AppError::Conflict(_) => (StatusCode::BAD_REQUEST, ErrorCode::BookNotAvailable),
            AppError::LimitExceeded(_) => (StatusCode::BAD_REQUEST, ErrorCode::MaxBorrowsReached),
            AppError::InvalidState(_) => (StatusCode::BAD_REQUEST, ErrorCode::NoActiveBorrow),
            AppError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::StorageFailure),
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Failure),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = self.status();

        let message = match &self {
            AppError::Storage(e) => {
                tracing::error!("Storage error: {:?}", e);
                "Storage error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
