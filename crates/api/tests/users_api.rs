//! API integration tests.
//! Drive complete HTTP request/response cycles through the router against the
//! in-memory gateway, so no Postgres is required.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use api::AppState;
use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use db::{DbError, MemoryUserGateway, NewUser, UserGateway, UserPatch, UserRow};
use serde_json::{json, Value};
use tower::util::ServiceExt;

/// Fails every call with a constraint violation and counts the calls.
#[derive(Default)]
struct FailingGateway {
    calls: AtomicUsize,
}

impl FailingGateway {
    fn fail<T>(&self) -> Result<T, DbError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(DbError::ConstraintViolation("secret_constraint_name".into()))
    }
}

#[async_trait]
impl UserGateway for FailingGateway {
    async fn list_all(&self) -> Result<Vec<UserRow>, DbError> {
        self.fail()
    }

    async fn get_by_id(&self, _id: i32) -> Result<Option<UserRow>, DbError> {
        self.fail()
    }

    async fn insert(&self, _new_user: &NewUser) -> Result<UserRow, DbError> {
        self.fail()
    }

    async fn update_by_id(&self, _id: i32, _patch: &UserPatch) -> Result<Option<UserRow>, DbError> {
        self.fail()
    }

    async fn delete_by_id(&self, _id: i32) -> Result<Option<UserRow>, DbError> {
        self.fail()
    }
}

fn memory_app() -> Router {
    api::router(AppState::new(Arc::new(MemoryUserGateway::new())))
}

/// Send one request and return the status plus the decoded JSON body.
async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(serde_json::to_vec(&json).unwrap())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn create_ann(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "Ann", "age": 30, "email": "ann@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

#[tokio::test]
async fn list_is_empty_on_a_fresh_store() {
    let app = memory_app();
    let (status, body) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_returns_201_with_generated_id() {
    let app = memory_app();
    let body = create_ann(&app).await;
    assert_eq!(body, json!({"id": 1, "name": "Ann", "age": 30, "email": "ann@x.com"}));
}

#[tokio::test]
async fn created_user_reads_back_identically() {
    let app = memory_app();
    let created = create_ann(&app).await;

    let uri = format!("/api/users/{}", created["id"]);
    let (status, fetched) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_user_is_404() {
    let app = memory_app();
    let (status, body) = send(&app, Method::GET, "/api/users/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));
}

#[tokio::test]
async fn partial_update_only_changes_supplied_fields() {
    let app = memory_app();
    create_ann(&app).await;

    let (status, body) = send(&app, Method::PUT, "/api/users/1", Some(json!({"age": 31}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"id": 1, "name": "Ann", "age": 31, "email": "ann@x.com"}));
}

#[tokio::test]
async fn update_of_missing_user_is_404() {
    let app = memory_app();
    let (status, body) = send(&app, Method::PUT, "/api/users/5", Some(json!({"age": 1}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "User not found"}));
}

#[tokio::test]
async fn delete_returns_row_then_get_is_404() {
    let app = memory_app();
    let created = create_ann(&app).await;

    let (status, deleted) = send(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted, created);

    let (status, _) = send(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = send(&app, Method::DELETE, "/api/users/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_integer_ids_are_400_before_storage() {
    let gateway = Arc::new(FailingGateway::default());
    let app = api::router(AppState::new(gateway.clone()));

    for (method, body) in [
        (Method::GET, None),
        (Method::PUT, Some(json!({"age": 3}))),
        (Method::DELETE, None),
    ] {
        let (status, body) = send(&app, method, "/api/users/abc", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid user ID"}));
    }
    assert_eq!(gateway.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn duplicate_email_is_500_and_not_stored_twice() {
    let app = memory_app();
    create_ann(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "Annie", "age": 22, "email": "ann@x.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));

    let (_, list) = send(&app, Method::GET, "/api/users", None).await;
    let with_email = list
        .as_array()
        .unwrap()
        .iter()
        .filter(|u| u["email"] == "ann@x.com")
        .count();
    assert_eq!(with_email, 1);
}

#[tokio::test]
async fn storage_failures_do_not_leak_their_cause() {
    let app = api::router(AppState::new(Arc::new(FailingGateway::default())));

    let (status, body) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));
    assert!(!body.to_string().contains("secret_constraint_name"));
}

#[tokio::test]
async fn undecodable_create_bodies_are_500_and_store_nothing() {
    let app = memory_app();

    let (status, body) = send(&app, Method::POST, "/api/users", Some(json!({"name": "Ann", "age": 30}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Internal server error"}));

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("nope"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let (_, list) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn undecodable_update_bodies_are_400() {
    let app = memory_app();
    let created = create_ann(&app).await;

    for bad in [json!({"id": 9}), json!({"name": null}), json!({"age": "old"})] {
        let (status, body) = send(&app, Method::PUT, "/api/users/1", Some(bad)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "Invalid request body"}));
    }

    let (_, row) = send(&app, Method::GET, "/api/users/1", None).await;
    assert_eq!(row, created);
}

#[tokio::test]
async fn empty_update_returns_the_row_unchanged() {
    let app = memory_app();
    let created = create_ann(&app).await;

    let (status, body) = send(&app, Method::PUT, "/api/users/1", Some(json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, _) = send(&app, Method::PUT, "/api/users/2", Some(json!({}))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_reflects_creates_and_deletes() {
    let app = memory_app();
    create_ann(&app).await;
    send(
        &app,
        Method::POST,
        "/api/users",
        Some(json!({"name": "Bob", "age": 41, "email": "bob@x.com"})),
    )
    .await;
    send(&app, Method::DELETE, "/api/users/1", None).await;

    let (_, first) = send(&app, Method::GET, "/api/users", None).await;
    let (_, second) = send(&app, Method::GET, "/api/users", None).await;
    assert_eq!(first, second);
    assert_eq!(first, json!([{"id": 2, "name": "Bob", "age": 41, "email": "bob@x.com"}]));
}
