//! Catalog endpoints

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{Book, BookId, CreateBook, UpdateBook},
};

use super::{required, validate, ApiJson};

/// Search query string
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring matched against title or author, case-insensitive
    pub q: Option<String>,
}

/// Add book request
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(default)]
pub struct AddBookRequest {
    #[validate(length(min = 1))]
    pub title: String,
    #[validate(length(min = 1))]
    pub author: String,
    #[validate(length(min = 1))]
    pub category: String,
}

/// Edit book request; omitted or empty fields are left unchanged
#[derive(Debug, Deserialize, ToSchema)]
pub struct EditBookRequest {
    pub id: Option<BookId>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
}

/// Delete book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteBookRequest {
    pub id: Option<BookId>,
}

/// Availability update request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateAvailabilityRequest {
    pub id: Option<BookId>,
    /// Omitted means unavailable
    #[serde(default)]
    pub available: bool,
}

/// Plain confirmation
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            message: message.into(),
        })
    }
}

/// Confirmation carrying the affected book
#[derive(Debug, Serialize, ToSchema)]
pub struct BookMessageResponse {
    pub message: String,
    pub book: Book,
}

/// List the whole catalog
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    responses(
        (status = 200, description = "All books", body = Vec<Book>)
    )
)]
pub async fn list_books(State(state): State<crate::AppState>) -> Json<Vec<Book>> {
    Json(state.services.catalog.list().await)
}

/// Search books by title or author
#[utoipa::path(
    get,
    path = "/search",
    tag = "books",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching books in catalog order", body = Vec<Book>)
    )
)]
pub async fn search_books(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<Book>> {
    let q = query.q.unwrap_or_default();
    Json(state.services.catalog.search(&q).await)
}

/// Add a new book
#[utoipa::path(
    post,
    path = "/addBook",
    tag = "books",
    request_body = AddBookRequest,
    responses(
        (status = 200, description = "Book added", body = BookMessageResponse),
        (status = 400, description = "Missing field", body = crate::error::ErrorResponse)
    )
)]
pub async fn add_book(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<AddBookRequest>,
) -> AppResult<Json<BookMessageResponse>> {
    validate(&request)?;

    let book = state
        .services
        .catalog
        .create(CreateBook {
            title: request.title,
            author: request.author,
            category: request.category,
        })
        .await?;

    Ok(Json(BookMessageResponse {
        message: "Book added".to_string(),
        book,
    }))
}

/// Edit title, author or category of a book
#[utoipa::path(
    post,
    path = "/editBook",
    tag = "books",
    request_body = EditBookRequest,
    responses(
        (status = 200, description = "Book updated", body = BookMessageResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn edit_book(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<EditBookRequest>,
) -> AppResult<Json<BookMessageResponse>> {
    let id = required(request.id, "id")?;

    let book = state
        .services
        .catalog
        .update(
            id,
            UpdateBook {
                title: request.title,
                author: request.author,
                category: request.category,
            },
        )
        .await?;

    Ok(Json(BookMessageResponse {
        message: "Book updated".to_string(),
        book,
    }))
}

/// Delete a book
#[utoipa::path(
    post,
    path = "/deleteBook",
    tag = "books",
    request_body = DeleteBookRequest,
    responses(
        (status = 200, description = "Book deleted", body = MessageResponse),
        (status = 400, description = "Book is on loan", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<DeleteBookRequest>,
) -> AppResult<Json<MessageResponse>> {
    let id = required(request.id, "id")?;
    state.services.catalog.delete(id).await?;
    Ok(MessageResponse::new("Book deleted"))
}

/// Set a book's availability flag
#[utoipa::path(
    post,
    path = "/update",
    tag = "books",
    request_body = UpdateAvailabilityRequest,
    responses(
        (status = 200, description = "Availability updated", body = MessageResponse),
        (status = 400, description = "Book is on loan", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_availability(
    State(state): State<crate::AppState>,
    ApiJson(request): ApiJson<UpdateAvailabilityRequest>,
) -> AppResult<Json<MessageResponse>> {
    let id = required(request.id, "id")?;
    state
        .services
        .catalog
        .set_availability(id, request.available)
        .await?;
    Ok(MessageResponse::new("Updated"))
}
