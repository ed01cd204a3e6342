//! Common test utilities and helpers
//!
//! Every integration test drives the real router over a fresh in-memory
//! store, with a low bcrypt cost so signups stay fast.

#![allow(dead_code)]

use axum::http::{header::AUTHORIZATION, HeaderName, HeaderValue};
use axum_test::{TestRequest, TestServer};
use serde_json::{json, Value};
use uuid::Uuid;

use quillpost::backend::auth::{PasswordHasher, TokenService};
use quillpost::backend::routes::create_router;
use quillpost::backend::server::AppState;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Cheapest cost bcrypt accepts
pub const TEST_COST: u32 = 4;

pub fn test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET)
}

pub fn test_state() -> AppState {
    AppState::in_memory(test_tokens(), PasswordHasher::new(TEST_COST))
}

pub fn test_server() -> TestServer {
    TestServer::new(create_router(test_state())).expect("failed to start test server")
}

/// A valid signup body for `username`, with `username@example.com` as email
pub fn signup_body(username: &str) -> Value {
    json!({
        "username": username,
        "name": { "first": "Test", "last": "User" },
        "password": "password123",
        "email": format!("{}@example.com", username),
        "preferences": ["tech", "music", "travel"]
    })
}

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub token: String,
}

/// Sign up through the API and return the new user's credentials
pub async fn create_user(server: &TestServer, username: &str) -> TestUser {
    create_user_with(server, signup_body(username)).await
}

pub async fn create_user_with(server: &TestServer, body: Value) -> TestUser {
    let response = server.post("/api/v1/user/signup").json(&body).await;
    response.assert_status_ok();
    let token = response.json::<Value>()["token"]
        .as_str()
        .expect("signup returns a token")
        .to_string();
    let id = test_tokens().verify(&token).expect("signup token verifies");

    TestUser {
        id,
        username: body["username"].as_str().unwrap_or_default().trim().to_lowercase(),
        email: body["email"].as_str().unwrap_or_default().trim().to_lowercase(),
        token,
    }
}

pub fn header(name: HeaderName, value: &str) -> (HeaderName, HeaderValue) {
    (name, HeaderValue::from_str(value).expect("valid header value"))
}

/// Attach `Authorization: Bearer <token>`
pub fn authed(request: TestRequest, token: &str) -> TestRequest {
    let (name, value) = header(AUTHORIZATION, &format!("Bearer {}", token));
    request.add_header(name, value)
}

/// Create a blog as `user` and return its id
pub async fn create_blog(server: &TestServer, user: &TestUser, title: &str, tags: &[&str]) -> Uuid {
    let response = authed(server.post("/api/v1/blog/create"), &user.token)
        .json(&json!({ "title": title, "body": format!("Body of {}", title), "tags": tags }))
        .await;
    response.assert_status_ok();
    let id = response.json::<Value>()["blogId"]
        .as_str()
        .expect("create returns blogId")
        .to_string();
    Uuid::parse_str(&id).expect("blogId is a uuid")
}

/// Titles of the blogs in a listing response, in order
pub fn titles(body: &Value) -> Vec<String> {
    body["blogs"]
        .as_array()
        .map(|blogs| {
            blogs
                .iter()
                .filter_map(|b| b["title"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
