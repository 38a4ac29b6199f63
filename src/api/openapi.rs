//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, students};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shelf API",
        version = "1.0.0",
        description = "Library catalog and lending REST API"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Catalog
        books::list_books,
        books::search_books,
        books::add_book,
        books::edit_book,
        books::delete_book,
        books::update_availability,
        // Roster
        students::get_student,
        students::get_borrowed,
        // Lending
        loans::borrow_book,
        loans::return_book,
    ),
    components(
        schemas(
            crate::models::Book,
            crate::models::Student,
            crate::models::BorrowRecord,
            crate::models::BorrowStatus,
            books::AddBookRequest,
            books::EditBookRequest,
            books::DeleteBookRequest,
            books::UpdateAvailabilityRequest,
            books::MessageResponse,
            books::BookMessageResponse,
            loans::LoanRequest,
            loans::BorrowResponse,
            health::HealthResponse,
            health::ReadinessResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog management"),
        (name = "students", description = "Student roster"),
        (name = "loans", description = "Borrow and return")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
