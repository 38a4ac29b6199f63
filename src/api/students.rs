//! Student roster endpoints

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    error::AppResult,
    models::{BorrowRecord, Student},
    services::students::StudentLookup,
};

/// Get a student profile with borrow history
#[utoipa::path(
    get,
    path = "/student/{id}",
    tag = "students",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student profile (or `[]` for an unknown id under lenient lookup)", body = Student),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_student(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Response> {
    let response = match state.services.students.get_student(&id).await? {
        StudentLookup::Found(student) => Json(student).into_response(),
        StudentLookup::Unknown => Json(Vec::<BorrowRecord>::new()).into_response(),
    };
    Ok(response)
}

/// Get only the borrow records of a student
#[utoipa::path(
    get,
    path = "/my-borrows/{id}",
    tag = "students",
    params(
        ("id" = String, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Borrow records, oldest first", body = Vec<BorrowRecord>),
        (status = 404, description = "Student not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_borrowed(
    State(state): State<crate::AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Vec<BorrowRecord>>> {
    let records = state.services.students.get_borrowed(&id).await?;
    Ok(Json(records))
}
