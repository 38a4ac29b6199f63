//! API handlers for Shelf REST endpoints

pub mod books;
pub mod health;
pub mod loans;
pub mod openapi;
pub mod students;

use axum::{
    extract::FromRequest,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use validator::{Validate, ValidationErrors};

use crate::{
    error::{AppError, AppResult},
    AppState,
};

/// JSON body extractor whose rejections use the application error format
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Run `validator` rules and report the offending fields
pub(crate) fn validate<T: Validate>(payload: &T) -> AppResult<()> {
    payload.validate().map_err(|e| AppError::Validation(missing_fields(&e)))
}

fn missing_fields(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors.field_errors().keys().map(|k| k.to_string()).collect();
    fields.sort();
    format!("All fields required (missing: {})", fields.join(", "))
}

/// Unwrap a field that must be present in the request body
pub(crate) fn required<T>(value: Option<T>, field: &str) -> AppResult<T> {
    value.ok_or_else(|| AppError::Validation(format!("{} is required", field)))
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Health check
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        // Catalog
        .route("/books", get(books::list_books))
        .route("/search", get(books::search_books))
        .route("/addBook", post(books::add_book))
        .route("/editBook", post(books::edit_book))
        .route("/deleteBook", post(books::delete_book))
        .route("/update", post(books::update_availability))
        // Roster
        .route("/student/:id", get(students::get_student))
        .route("/my-borrows/:id", get(students::get_borrowed))
        // Lending
        .route("/borrow", post(loans::borrow_book))
        .route("/return", post(loans::return_book))
        .with_state(state.clone());

    let mut app = Router::new()
        .merge(api)
        .merge(openapi::create_openapi_router());

    // Front-end assets for anything the API does not handle
    if let Some(dir) = &state.config.server.static_dir {
        tracing::info!("Serving static files from {}", dir);
        app = app.fallback_service(ServeDir::new(dir));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
}
