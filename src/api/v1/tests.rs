//! End-to-end scenarios through the real Router, backed by in-memory repos.
use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
    response::Response,
};
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::app::build_router;
use crate::repos::memory::{MemorySequenceRepo, MemoryTaskListRepo, MemoryUserRepo};
use crate::services::{
    AuthService, TaskListService,
    auth::{PasswordService, TokenSigner, password::cheap_cost},
};
use crate::state::AppState;

const SECRET: &[u8] = b"0123456789abcdef0123456789abcdef";
const OTHER_SECRET: &[u8] = b"ffffffffffffffffffffffffffffffff";

fn app() -> Router {
    let sequences = Arc::new(MemorySequenceRepo::default());
    let task_lists = Arc::new(MemoryTaskListRepo::new(sequences));
    let auth = AuthService::new(
        Arc::new(MemoryUserRepo::default()),
        PasswordService::new(cheap_cost()).unwrap(),
        TokenSigner::new(SECRET, "task-manager", 43_200),
    );
    let state = AppState::new(Arc::new(auth), Arc::new(TaskListService::new(task_lists)));
    build_router(state, Duration::from_secs(30))
}

async fn into_json(resp: Response) -> (StatusCode, Value) {
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    authorization: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    into_json(app.clone().oneshot(req).await.unwrap()).await
}

async fn get(app: &Router, uri: &str, auth: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, auth, None).await
}

async fn post(app: &Router, uri: &str, auth: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, auth, Some(body)).await
}

async fn put(app: &Router, uri: &str, auth: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::PUT, uri, auth, Some(body)).await
}

async fn delete(app: &Router, uri: &str, auth: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::DELETE, uri, auth, None).await
}

async fn register_and_login(app: &Router, username: &str, password: &str) -> String {
    let creds = json!({"username": username, "password": password});

    let (status, body) = post(app, "/api/v1/auth/register", None, creds.clone()).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["id"].is_string());

    let (status, body) = post(app, "/api/v1/auth/login", None, creds).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["token_type"], "Bearer");
    assert_eq!(body["expires_in"], 43_200);

    format!("Bearer {}", body["token"].as_str().unwrap())
}

#[tokio::test]
async fn health_is_public() {
    let app = app();
    let (status, body) = get(&app, "/api/v1/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn full_task_list_lifecycle() {
    let app = app();
    let auth = register_and_login(&app, "alice123", "Secret1!").await;
    let auth = Some(auth.as_str());

    let (status, body) = post(&app, "/api/v1/tasks", auth, json!({"title": "Groceries"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 1);

    let (status, body) = post(&app, "/api/v1/tasks", auth, json!({"title": "Chores"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 2);

    let (status, body) = get(&app, "/api/v1/tasks", auth).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (status, body) = get(&app, "/api/v1/tasks/1", auth).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Groceries");
    assert_eq!(body["description"], "");

    let (status, body) = delete(&app, "/api/v1/tasks/1", auth).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, body) = get(&app, "/api/v1/tasks/1", auth).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn empty_title_is_rejected_without_burning_an_id() {
    let app = app();
    let auth = register_and_login(&app, "alice123", "Secret1!").await;
    let auth = Some(auth.as_str());

    let (status, body) = post(&app, "/api/v1/tasks", auth, json!({"title": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "task list name cannot be empty");

    let (status, _) = get(&app, "/api/v1/tasks", auth).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = post(&app, "/api/v1/tasks", auth, json!({"title": "Groceries"})).await;
    assert_eq!(body["id"], 1);
}

#[tokio::test]
async fn update_rules() {
    let app = app();
    let auth = register_and_login(&app, "alice123", "Secret1!").await;
    let auth = Some(auth.as_str());
    let list = json!({"title": "Groceries", "description": "weekly"});
    post(&app, "/api/v1/tasks", auth, list).await;

    let (status, body) = put(&app, "/api/v1/tasks/1", auth, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "no fields to update");

    let (status, _) = put(&app, "/api/v1/tasks/1", auth, json!({"description": "daily"})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/v1/tasks/1", auth).await;
    assert_eq!(body["title"], "Groceries");
    assert_eq!(body["description"], "daily");

    let (status, _) = put(&app, "/api/v1/tasks/99", auth, json!({"title": "x"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn other_users_lists_look_missing() {
    let app = app();
    let alice = register_and_login(&app, "alice123", "Secret1!").await;
    let alice = Some(alice.as_str());
    let bob = register_and_login(&app, "bob456", "Hunter2!").await;
    let bob = Some(bob.as_str());

    let (_, body) = post(&app, "/api/v1/tasks", bob, json!({"title": "Bob's"})).await;
    let id = body["id"].as_i64().unwrap();
    let uri = format!("/api/v1/tasks/{id}");

    let (status, _) = get(&app, &uri, alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = put(&app, &uri, alice, json!({"title": "mine"})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = delete(&app, &uri, alice).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = get(&app, &uri, bob).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Bob's");
}

#[tokio::test]
async fn bad_ids_are_validation_errors() {
    let app = app();
    let auth = register_and_login(&app, "alice123", "Secret1!").await;
    let auth = Some(auth.as_str());

    let (status, body) = delete(&app, "/api/v1/tasks/0", auth).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["message"], "invalid task list ID");

    let (status, _) = get(&app, "/api/v1/tasks/abc", auth).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrongly_typed_body_is_a_validation_error() {
    let app = app();
    let auth = register_and_login(&app, "alice123", "Secret1!").await;
    let auth = Some(auth.as_str());

    let (status, body) = post(&app, "/api/v1/tasks", auth, json!({"title": 5})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = put(&app, "/api/v1/tasks/1", auth, json!({"description": true})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn body_without_json_content_type_is_a_validation_error() {
    let app = app();

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/register")
        .body(Body::from(r#"{"username":"alice123","password":"Secret1!"}"#))
        .unwrap();
    let (status, body) = into_json(app.clone().oneshot(req).await.unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let req = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = into_json(app.oneshot(req).await.unwrap()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn protected_routes_need_a_valid_bearer_token() {
    let app = app();

    let (status, body) = get(&app, "/api/v1/tasks", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    for header_value in ["Bearer", "Bearer a b", "garbage"] {
        let (status, _) = get(&app, "/api/v1/tasks", Some(header_value)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{header_value:?}");
    }

    let (status, body) = get(&app, "/api/v1/tasks", Some("Bearer not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "invalid or expired token");

    // signed by someone else
    let foreign = TokenSigner::new(OTHER_SECRET, "task-manager", 60)
        .issue(uuid::Uuid::new_v4())
        .unwrap();
    let header_value = format!("Bearer {}", foreign.token);
    let (status, _) = get(&app, "/api/v1/tasks", Some(header_value.as_str())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let app = app();
    let issued_at =
        chrono::Utc::now() - chrono::Duration::hours(12) - chrono::Duration::seconds(1);
    let expired = TokenSigner::new(SECRET, "task-manager", 43_200)
        .issue_at(uuid::Uuid::new_v4(), issued_at)
        .unwrap();

    let header_value = format!("Bearer {}", expired.token);
    let (status, _) = get(&app, "/api/v1/tasks", Some(header_value.as_str())).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn registration_and_login_failures() {
    let app = app();
    register_and_login(&app, "alice123", "Secret1!").await;

    let taken = json!({"username": "alice123", "password": "Other99!"});
    let (status, body) = post(&app, "/api/v1/auth/register", None, taken).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");

    let malformed = json!({"username": "a!", "password": "Secret1!"});
    let (status, body) = post(&app, "/api/v1/auth/register", None, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let wrong = json!({"username": "alice123", "password": "wrong!!"});
    let (status, body) = post(&app, "/api/v1/auth/login", None, wrong).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["message"], "invalid credentials");
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = app();
    let req = Request::builder()
        .uri("/api/v1/health")
        .body(Body::empty())
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));
}
