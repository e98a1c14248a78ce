/**
 * API Routes
 *
 * Everything here is nested under `/api`.
 *
 * ## Public
 * - `POST /auth/signup`
 * - `POST /auth/login`
 *
 * ## Authenticated (token in `Authorization: Bearer` or the `token` cookie)
 * - `POST /auth/logout`, `GET /auth/me`
 * - `GET /friends`, `GET /friends/requests/sent`,
 *   `GET /friends/requests/received`, `GET /friends/suggestions`
 * - `POST /friends/requests/{userId}` send,
 *   `PATCH /friends/requests/{userId}/accept` accept,
 *   `DELETE /friends/requests/{userId}` cancel,
 *   `DELETE /friends/requests/{userId}/ignore` ignore
 * - `DELETE /friends/{userId}` unfriend, `GET /friends/{userId}/status`
 * - `PATCH /users/profile_pic`, `GET /users/{userId}`,
 *   `GET /users/{userId}/friends`
 * - `GET /notifications`, `PATCH /notifications/{id}/read`
 */

use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, patch, post},
    Router,
};

use crate::backend::auth::{get_me, login, logout, signup};
use crate::backend::friends::handlers::{
    accept_request, cancel_sent_request, ignore_received_request, list_friends,
    list_received_requests, list_sent_requests, relationship_status, remove_friend, send_request,
    suggest_friends,
};
use crate::backend::middleware::auth::auth_middleware;
use crate::backend::notifications::handlers::{list_notifications, mark_notification_read};
use crate::backend::server::state::AppState;
use crate::backend::users::handlers::{get_user_details, get_user_friends, update_profile_images};

/// Build the `/api` router
///
/// The auth middleware is a route layer on the protected group, so unknown
/// paths still fall through to the 404 fallback instead of answering 401.
pub fn configure_api_routes(app_state: AppState) -> Router<AppState> {
    let public = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login));

    let protected = Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(get_me))
        // Friends
        .route("/friends", get(list_friends))
        .route("/friends/suggestions", get(suggest_friends))
        .route("/friends/requests/sent", get(list_sent_requests))
        .route("/friends/requests/received", get(list_received_requests))
        .route(
            "/friends/requests/{user_id}",
            post(send_request).delete(cancel_sent_request),
        )
        .route("/friends/requests/{user_id}/accept", patch(accept_request))
        .route(
            "/friends/requests/{user_id}/ignore",
            delete(ignore_received_request),
        )
        .route("/friends/{user_id}", delete(remove_friend))
        .route("/friends/{user_id}/status", get(relationship_status))
        // Users
        .route("/users/profile_pic", patch(update_profile_images))
        .route("/users/{user_id}", get(get_user_details))
        .route("/users/{user_id}/friends", get(get_user_friends))
        // Notifications
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", patch(mark_notification_read))
        .route_layer(from_fn_with_state(app_state, auth_middleware));

    public.merge(protected)
}
