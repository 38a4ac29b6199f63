//! Loan management endpoints

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::AppResult, models::BookId};

use super::{books::MessageResponse, required, ApiJson};

/// Borrow or return request
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoanRequest {
    /// Student ID
    pub student_id: Option<String>,
    /// Book ID
    pub book_id: Option<BookId>,
}

impl LoanRequest {
    fn into_parts(self) -> AppResult<(String, BookId)> {
        Ok((
            required(self.student_id, "studentId")?,
            required(self.book_id, "bookId")?,
        ))
    }
}

/// Borrow confirmation with due date
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BorrowResponse {
    /// Status message
    pub message: String,
    /// Due date (ISO 8601 format)
    pub due_at: DateTime<Utc>,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrow",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book borrowed", body = BorrowResponse),
        (status = 400, description = "Book already issued or borrow limit reached", body = crate::error::ErrorResponse),
        (status = 404, description = "Student or book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<LoanRequest>,
) -> AppResult<Json<BorrowResponse>> {
    let (student_id, book_id) = request.into_parts()?;

    let receipt = state.services.loans.borrow(&student_id, book_id).await?;

    Ok(Json(BorrowResponse {
        message: "Book borrowed".to_string(),
        due_at: receipt.due_at,
    }))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/return",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book returned", body = MessageResponse),
        (status = 400, description = "No active borrow for this book", body = crate::error::ErrorResponse),
        (status = 404, description = "Student or book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<LoanRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (student_id, book_id) = request.into_parts()?;

    state.services.loans.return_book(&student_id, book_id).await?;

    Ok(MessageResponse::new("Book returned"))
}
