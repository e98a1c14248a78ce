//! Authentication API integration tests
//!
//! Signup, login, logout, the current-user endpoint and the auth gate.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{assert_error, assert_success, TestApp, TEST_PASSWORD};
use socialnet::shared::UserStatus;

fn signup_body(email: &str, password: &str) -> serde_json::Value {
    json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": email,
        "password": password,
    })
}

#[tokio::test]
async fn test_signup_success() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(signup_body("ada@example.com", "password123")),
        )
        .await;

    assert_success(&response, StatusCode::CREATED, "Account created successfully");
    let data = &response.body["data"];
    assert!(!data["token"].as_str().unwrap().is_empty());
    assert_eq!(data["user"]["email"], "ada@example.com");
    assert_eq!(data["user"]["status"], "INACTIVE");
    assert!(data["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_signup_duplicate_email() {
    let app = TestApp::new().await;
    let body = signup_body("dup@example.com", "password123");

    let first = app
        .request(Method::POST, "/api/auth/signup", None, Some(body.clone()))
        .await;
    assert_eq!(first.status, StatusCode::CREATED);

    let second = app
        .request(Method::POST, "/api/auth/signup", None, Some(body))
        .await;
    assert_error(&second, StatusCode::CONFLICT);
    assert_eq!(second.message(), "Email already registered");
}

#[tokio::test]
async fn test_signup_validation() {
    let app = TestApp::new().await;

    let bad_email = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(signup_body("not-an-email", "password123")),
        )
        .await;
    assert_error(&bad_email, StatusCode::BAD_REQUEST);
    assert_eq!(bad_email.message(), "Invalid email format");

    let short_password = app
        .request(
            Method::POST,
            "/api/auth/signup",
            None,
            Some(signup_body("ada@example.com", "short")),
        )
        .await;
    assert_error(&short_password, StatusCode::BAD_REQUEST);

    assert_eq!(app.db.count("users").await, 0);
}

#[tokio::test]
async fn test_login_success_sets_cookie_and_status() {
    let app = TestApp::new().await;
    let user = app.user("Grace").await;

    let response = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": user.email, "password": TEST_PASSWORD })),
        )
        .await;

    assert_success(&response, StatusCode::CREATED, "You have logged in successfully");
    assert_eq!(response.body["data"]["user"]["status"], "ACTIVE");

    let cookie = response.headers[header::SET_COOKIE].to_str().unwrap();
    let token = response.body["data"]["token"].as_str().unwrap();
    assert!(cookie.starts_with(&format!("token={};", token)));
    crate::assert_contains!(cookie, "HttpOnly");
    crate::assert_contains!(cookie, "SameSite=Strict");
    crate::assert_contains!(cookie, "Path=/");

    let stored = app.db.find_user(user.id).await.unwrap();
    assert_eq!(stored.status(), UserStatus::Active);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;
    let user = app.user("Grace").await;

    let unknown = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": TEST_PASSWORD })),
        )
        .await;
    assert_error(&unknown, StatusCode::BAD_REQUEST);
    assert_eq!(unknown.message(), "Incorrect email address");

    let wrong = app
        .request(
            Method::POST,
            "/api/auth/login",
            None,
            Some(json!({ "email": user.email, "password": "wrongpassword" })),
        )
        .await;
    assert_error(&wrong, StatusCode::BAD_REQUEST);
    assert_eq!(wrong.message(), "Incorrect password");
}

#[tokio::test]
async fn test_me_with_bearer_and_cookie() {
    let app = TestApp::new().await;
    let user = app.user("Linus").await;

    let response = app.get("/api/auth/me", &user).await;
    assert_success(&response, StatusCode::OK, "Fetch current user");
    assert_eq!(response.body["data"]["id"], user.id.to_string());

    let request = Request::builder()
        .uri("/api/auth/me")
        .header(header::COOKIE, format!("token={}", user.token))
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["data"]["email"], user.email);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = TestApp::new().await;

    let missing = app.request(Method::GET, "/api/auth/me", None, None).await;
    assert_error(&missing, StatusCode::UNAUTHORIZED);
    assert_eq!(missing.message(), "Authentication required");

    let invalid = app
        .request(Method::GET, "/api/friends", Some("not.a.token"), None)
        .await;
    assert_error(&invalid, StatusCode::UNAUTHORIZED);

    let foreign = socialnet::backend::auth::sessions::create_token(
        uuid::Uuid::new_v4(),
        "ghost@example.com",
        crate::common::TEST_SECRET,
        3600,
    )
    .unwrap();
    let unknown_user = app
        .request(Method::GET, "/api/friends", Some(&foreign), None)
        .await;
    assert_error(&unknown_user, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_logout_marks_inactive_and_clears_cookie() {
    let app = TestApp::new().await;
    let user = app.user("Ken").await;
    app.request(
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": user.email, "password": TEST_PASSWORD })),
    )
    .await;

    let response = app.post("/api/auth/logout", &user).await;
    assert_success(&response, StatusCode::OK, "You have logged out successfully");
    crate::assert_contains!(
        response.headers[header::SET_COOKIE].to_str().unwrap(),
        "Max-Age=0"
    );

    let stored = app.db.find_user(user.id).await.unwrap();
    assert_eq!(stored.status(), UserStatus::Inactive);
}

#[tokio::test]
async fn test_unknown_route_is_enveloped_404() {
    let app = TestApp::new().await;
    let response = app.request(Method::GET, "/api/nowhere", None, None).await;
    assert_error(&response, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "Route not found");
}
