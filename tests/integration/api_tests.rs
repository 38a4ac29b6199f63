//! API integration tests
//!
//! The router is driven in-process over an in-memory store.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use shelf_server::{
    api::create_router,
    config::AppConfig,
    models::{Book, Library, Student},
    repository::storage::MemoryStorage,
    AppState,
};

fn book(id: i64, title: &str, author: &str, available: bool) -> Book {
    Book {
        id,
        title: title.to_string(),
        author: author.to_string(),
        category: "Fiction".to_string(),
        available,
    }
}

fn student(id: &str, name: &str) -> Student {
    Student {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@school.test", name.to_lowercase()),
        borrowed: Vec::new(),
    }
}

fn seed_library() -> Library {
    Library::new(
        vec![
            book(1, "Dune", "Herbert", true),
            book(2, "Emma", "Austen", true),
        ],
        vec![student("s1", "Asha")],
    )
}

/// Build a router over `library` and keep a handle on the backing store
async fn setup(library: Library, config: AppConfig) -> (Router, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new(library));
    let state = AppState::build(config, storage.clone())
        .await
        .expect("Failed to build state");
    (create_router(state), storage)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("Failed to parse response")
    };
    (status, value)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup(seed_library(), AppConfig::default()).await;

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = get(&app, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["books"], 2);
}

#[tokio::test]
async fn test_lending_walkthrough() {
    let (app, storage) = setup(seed_library(), AppConfig::default()).await;

    let (status, body) = post(&app, "/borrow", json!({"studentId": "s1", "bookId": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book borrowed");
    assert!(body["dueAt"].is_string());

    let (_, books) = get(&app, "/books").await;
    assert_eq!(books[0]["available"], false);
    assert_eq!(books[1]["available"], true);

    let (status, body) = post(&app, "/borrow", json!({"studentId": "s1", "bookId": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Book already issued");

    let (status, records) = get(&app, "/my-borrows/s1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(records.as_array().map(Vec::len), Some(1));
    assert_eq!(records[0]["bookId"], 1);
    assert_eq!(records[0]["title"], "Dune");
    assert_eq!(records[0]["status"], "borrowed");

    let (status, body) = post(&app, "/return", json!({"studentId": "s1", "bookId": 1})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book returned");

    let (_, profile) = get(&app, "/student/s1").await;
    assert_eq!(profile["name"], "Asha");
    assert_eq!(profile["borrowed"][0]["status"], "returned");
    assert!(profile["borrowed"][0]["returnedAt"].is_string());

    let (_, books) = get(&app, "/books").await;
    assert_eq!(books[0]["available"], true);

    // Every change reached the store
    let persisted = storage.snapshot();
    assert!(persisted.books[0].available);
    assert_eq!(persisted.students["s1"].borrowed.len(), 1);

    let (status, body) = post(&app, "/return", json!({"studentId": "s1", "bookId": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "No active borrow found for this book");
}

#[tokio::test]
async fn test_borrow_unknown_parties() {
    let (app, storage) = setup(seed_library(), AppConfig::default()).await;

    let (status, body) = post(&app, "/borrow", json!({"studentId": "s1", "bookId": 99})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NoSuchBook");

    let (status, _) = post(&app, "/borrow", json!({"studentId": "ghost", "bookId": 2})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post(&app, "/borrow", json!({"bookId": 2})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing was issued
    assert_eq!(storage.snapshot(), seed_library());
}

#[tokio::test]
async fn test_borrow_limit() {
    let mut config = AppConfig::default();
    config.lending.max_active_borrows = 1;
    let (app, _) = setup(seed_library(), config).await;

    let (status, _) = post(&app, "/borrow", json!({"studentId": "s1", "bookId": 1})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/borrow", json!({"studentId": "s1", "bookId": 2})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Borrow limit reached (1)");
}

#[tokio::test]
async fn test_auto_register_on_borrow() {
    let mut config = AppConfig::default();
    config.lending.auto_register_students = true;
    let (app, _) = setup(seed_library(), config).await;

    let (status, _) = post(&app, "/borrow", json!({"studentId": "s9", "bookId": 2})).await;
    assert_eq!(status, StatusCode::OK);

    let (status, records) = get(&app, "/my-borrows/s9").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(records[0]["title"], "Emma");
}

#[tokio::test]
async fn test_catalog_management() {
    let (app, _) = setup(seed_library(), AppConfig::default()).await;

    let (status, body) = post(
        &app,
        "/addBook",
        json!({"title": "Beloved", "author": "Morrison", "category": "Fiction"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book added");
    assert_eq!(body["book"]["id"], 3);
    assert_eq!(body["book"]["available"], true);

    let (status, body) = post(&app, "/addBook", json!({"title": "Untitled"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BadValue");

    let (status, body) = post(&app, "/editBook", json!({"id": 3, "title": "Jazz", "author": ""})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["book"]["title"], "Jazz");
    assert_eq!(body["book"]["author"], "Morrison");

    let (status, _) = post(&app, "/editBook", json!({"id": 42, "title": "Nope"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = post(&app, "/update", json!({"id": 2})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Updated");
    let (_, books) = get(&app, "/books").await;
    assert_eq!(books[1]["available"], false);

    let (status, body) = post(&app, "/deleteBook", json!({"id": 3})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Book deleted");

    let (status, _) = post(&app, "/deleteBook", json!({"id": 3})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Deleted ids are not handed out again
    let (_, body) = post(
        &app,
        "/addBook",
        json!({"title": "Sula", "author": "Morrison", "category": "Fiction"}),
    )
    .await;
    assert_eq!(body["book"]["id"], 4);
}

#[tokio::test]
async fn test_books_on_loan_are_guarded() {
    let (app, _) = setup(seed_library(), AppConfig::default()).await;
    post(&app, "/borrow", json!({"studentId": "s1", "bookId": 1})).await;

    let (status, _) = post(&app, "/deleteBook", json!({"id": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post(&app, "/update", json!({"id": 1, "available": true})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, books) = get(&app, "/books").await;
    assert_eq!(books.as_array().map(Vec::len), Some(2));
    assert_eq!(books[0]["available"], false);
}

#[tokio::test]
async fn test_search() {
    let (app, _) = setup(seed_library(), AppConfig::default()).await;

    let (status, hits) = get(&app, "/search?q=HER").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(hits.as_array().map(Vec::len), Some(1));
    assert_eq!(hits[0]["title"], "Dune");

    let (_, hits) = get(&app, "/search?q=austen").await;
    assert_eq!(hits[0]["id"], 2);

    let (_, hits) = get(&app, "/search").await;
    assert_eq!(hits.as_array().map(Vec::len), Some(2));

    let (_, hits) = get(&app, "/search?q=zzz").await;
    assert_eq!(hits, json!([]));
}

#[tokio::test]
async fn test_student_lookup() {
    let (app, _) = setup(seed_library(), AppConfig::default()).await;

    let (status, body) = get(&app, "/student/s1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "s1");
    assert_eq!(body["borrowed"], json!([]));

    let (status, body) = get(&app, "/student/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 4);

    let (status, _) = get(&app, "/my-borrows/nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_lenient_student_lookup() {
    let mut config = AppConfig::default();
    config.lending.lenient_student_lookup = true;
    let (app, _) = setup(seed_library(), config).await;

    let (status, body) = get(&app, "/student/nobody").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_malformed_body() {
    let (app, _) = setup(seed_library(), AppConfig::default()).await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/borrow")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .expect("Failed to build request");
    let response = app.oneshot(request).await.expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document() {
    let (app, _) = setup(seed_library(), AppConfig::default()).await;

    let (status, doc) = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/borrow"].is_object());
}

#[tokio::test]
async fn test_scenario_from_empty_catalog() {
    let library = Library::new(Vec::new(), vec![student("s1", "Asha"), student("s2", "Ravi")]);
    let (app, _) = setup(library, AppConfig::default()).await;

    let (_, body) = post(&app, "/addBook", json!({"title": "X", "author": "Y", "category": "Z"})).await;
    assert_eq!(body["book"]["id"], 1);
    assert_eq!(body["book"]["available"], true);

    let (status, body) = post(&app, "/borrow", json!({"studentId": "s1", "bookId": 1})).await;
    assert_eq!(status, StatusCode::OK);
    let due_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(body["dueAt"].clone()).expect("dueAt is a timestamp");

    let (_, records) = get(&app, "/my-borrows/s1").await;
    let borrowed_at: chrono::DateTime<chrono::Utc> =
        serde_json::from_value(records[0]["borrowedAt"].clone()).expect("borrowedAt is a timestamp");
    assert_eq!(due_at - borrowed_at, chrono::Duration::days(14));

    let (status, body) = post(&app, "/borrow", json!({"studentId": "s2", "bookId": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 7);

    let (status, _) = post(&app, "/return", json!({"studentId": "s1", "bookId": 1})).await;
    assert_eq!(status, StatusCode::OK);
    let (_, books) = get(&app, "/books").await;
    assert_eq!(books[0]["available"], true);

    let (status, body) = post(&app, "/return", json!({"studentId": "s1", "bookId": 1})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 13);
}
