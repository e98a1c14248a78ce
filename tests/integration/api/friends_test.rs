//! Friends API integration tests
//!
//! Drives the request lifecycle over HTTP and checks both sides' lists after
//! every transition.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common::{assert_error, assert_success, TestApp, TestUser};

async fn ids(app: &TestApp, uri: &str, user: &TestUser) -> Vec<String> {
    let response = app.get(uri, user).await;
    assert_eq!(response.status, StatusCode::OK, "body: {}", response.body);
    response.user_ids()
}

async fn status(app: &TestApp, viewer: &TestUser, other: &TestUser) -> String {
    let response = app
        .get(&format!("/api/friends/{}/status", other.id), viewer)
        .await;
    assert_success(&response, StatusCode::OK, "Fetch relationship");
    response.body["data"].as_str().unwrap_or_default().to_string()
}

#[tokio::test]
async fn test_request_accept_unfriend_flow() {
    let app = TestApp::new().await;
    let alice = app.user("Alice").await;
    let bob = app.user("Bob").await;

    let sent = app
        .post(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;
    assert_success(&sent, StatusCode::OK, "Friend request sent");
    assert!(sent.body["data"].is_null());

    assert_eq!(ids(&app, "/api/friends/requests/sent", &alice).await, vec![bob.id.to_string()]);
    assert_eq!(
        ids(&app, "/api/friends/requests/received", &bob).await,
        vec![alice.id.to_string()]
    );
    assert_eq!(status(&app, &alice, &bob).await, "request_sent");
    assert_eq!(status(&app, &bob, &alice).await, "request_received");

    let accepted = app
        .patch(&format!("/api/friends/requests/{}/accept", alice.id), &bob)
        .await;
    assert_success(&accepted, StatusCode::OK, "Both of you are now friends");

    assert!(ids(&app, "/api/friends/requests/sent", &alice).await.is_empty());
    assert!(ids(&app, "/api/friends/requests/received", &bob).await.is_empty());
    assert_eq!(ids(&app, "/api/friends", &alice).await, vec![bob.id.to_string()]);
    assert_eq!(ids(&app, "/api/friends", &bob).await, vec![alice.id.to_string()]);
    assert_eq!(status(&app, &alice, &bob).await, "friends");

    let removed = app
        .delete(&format!("/api/friends/{}", alice.id), &bob)
        .await;
    assert_success(&removed, StatusCode::OK, "Both of you are not friends from now");
    assert!(ids(&app, "/api/friends", &alice).await.is_empty());
    assert!(ids(&app, "/api/friends", &bob).await.is_empty());
    assert_eq!(status(&app, &alice, &bob).await, "none");
}

#[tokio::test]
async fn test_friend_list_carries_previews() {
    let app = TestApp::new().await;
    let alice = app.user("Alice").await;
    let bob = app.user("Bob").await;
    let carol = app.user("Carol").await;

    for other in [&bob, &carol] {
        app.post(&format!("/api/friends/requests/{}", other.id), &alice)
            .await;
        app.patch(&format!("/api/friends/requests/{}/accept", alice.id), other)
            .await;
    }

    let response = app.get("/api/friends", &bob).await;
    assert_success(&response, StatusCode::OK, "Fetch my friends");
    let entry = &response.body["data"]["users"][0];
    assert_eq!(entry["id"], alice.id.to_string());
    assert_eq!(entry["first_name"], "Alice");
    assert_eq!(entry["friend_count"], 2);
    assert_eq!(entry["friends_preview"].as_array().map(Vec::len), Some(2));
    assert!(entry.get("email").is_none());
}

#[tokio::test]
async fn test_cancel_and_ignore() {
    let app = TestApp::new().await;
    let alice = app.user("Alice").await;
    let bob = app.user("Bob").await;

    app.post(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;
    let cancelled = app
        .delete(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;
    assert_success(&cancelled, StatusCode::OK, "Friend request cancelled");
    assert!(ids(&app, "/api/friends/requests/received", &bob).await.is_empty());

    app.post(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;
    let ignored = app
        .delete(&format!("/api/friends/requests/{}/ignore", alice.id), &bob)
        .await;
    assert_success(&ignored, StatusCode::OK, "Friend request ignored successfully");
    assert!(ids(&app, "/api/friends/requests/sent", &alice).await.is_empty());
    assert!(ids(&app, "/api/friends", &bob).await.is_empty());

    // Ignoring does not block a new request
    let again = app
        .post(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_guard_violations() {
    let app = TestApp::new().await;
    let alice = app.user("Alice").await;
    let bob = app.user("Bob").await;

    let response = app
        .patch(&format!("/api/friends/requests/{}/accept", bob.id), &alice)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Friend request not received");

    let response = app
        .delete(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "You have not sent friend request");

    let response = app
        .delete(&format!("/api/friends/requests/{}/ignore", bob.id), &alice)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "You have not received friend request");

    let response = app.delete(&format!("/api/friends/{}", bob.id), &alice).await;
    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Both of you are not friends");

    app.post(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;
    let response = app
        .post(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Friend request already sent");

    let response = app
        .post(&format!("/api/friends/requests/{}", alice.id), &bob)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "This user has already sent you a friend request");

    // The requester cannot accept their own request
    let response = app
        .patch(&format!("/api/friends/requests/{}/accept", bob.id), &alice)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);

    app.patch(&format!("/api/friends/requests/{}/accept", alice.id), &bob)
        .await;
    let response = app
        .post(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(response.message(), "Both of you are already friends");
}

#[tokio::test]
async fn test_self_and_unknown_targets() {
    let app = TestApp::new().await;
    let alice = app.user("Alice").await;

    let response = app
        .post(&format!("/api/friends/requests/{}", alice.id), &alice)
        .await;
    assert_error(&response, StatusCode::BAD_REQUEST);
    assert_eq!(app.db.count("friend_requests").await, 0);

    let ghost = uuid::Uuid::new_v4();
    let response = app
        .post(&format!("/api/friends/requests/{}", ghost), &alice)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);
    assert_eq!(response.message(), "User not found");

    let response = app
        .get(&format!("/api/friends/{}/status", ghost), &alice)
        .await;
    assert_error(&response, StatusCode::NOT_FOUND);

    assert_eq!(status(&app, &alice, &alice).await, "none");

    let response = app.post("/api/friends/requests/not-a-uuid", &alice).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_suggestions_exclude_related_users() {
    let app = TestApp::new().await;
    let alice = app.user("Alice").await;
    let friend = app.user("Friend").await;
    let requested = app.user("Requested").await;
    let requester = app.user("Requester").await;
    let stranger = app.user("Stranger").await;

    app.post(&format!("/api/friends/requests/{}", friend.id), &alice)
        .await;
    app.patch(&format!("/api/friends/requests/{}/accept", alice.id), &friend)
        .await;
    app.post(&format!("/api/friends/requests/{}", requested.id), &alice)
        .await;
    app.post(&format!("/api/friends/requests/{}", alice.id), &requester)
        .await;

    let response = app.get("/api/friends/suggestions", &alice).await;
    assert_success(&response, StatusCode::OK, "Fetch friends suggestions");
    assert_eq!(response.user_ids(), vec![stranger.id.to_string()]);
}

#[tokio::test]
async fn test_concurrent_accepts_yield_one_friendship() {
    let app = TestApp::new().await;
    let alice = app.user("Alice").await;
    let bob = app.user("Bob").await;

    app.post(&format!("/api/friends/requests/{}", bob.id), &alice)
        .await;

    let uri = format!("/api/friends/requests/{}/accept", alice.id);
    let (first, second) = tokio::join!(app.patch(&uri, &bob), app.patch(&uri, &bob));

    let mut statuses = vec![first.status, second.status];
    statuses.sort();
    assert_eq!(statuses, vec![StatusCode::OK, StatusCode::BAD_REQUEST]);
    assert_eq!(app.db.count("friendships").await, 1);
    assert_eq!(app.db.count("friend_requests").await, 0);
}
