//! Friend HTTP Handlers
//!
//! Thin wrappers over [`FriendManager`](super::FriendManager): each handler
//! takes the caller from [`AuthUser`] and the other user from the path.
//! Transitions answer with `data: null`, lists with `data: { users }`.

use axum::extract::{Path, State};
use uuid::Uuid;

use crate::backend::error::BackendResult;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::social::UserList;
use crate::shared::{ApiResponse, Relationship, UserSummary};

/// `POST /api/friends/requests/{userId}`
pub async fn send_request(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> BackendResult<ApiResponse<()>> {
    state.friends.send_request(caller.user_id, user_id).await?;
    Ok(ApiResponse::empty("Friend request sent"))
}

/// `PATCH /api/friends/requests/{userId}/accept`
pub async fn accept_request(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> BackendResult<ApiResponse<()>> {
    state.friends.accept_request(caller.user_id, user_id).await?;
    Ok(ApiResponse::empty("Both of you are now friends"))
}

/// `DELETE /api/friends/requests/{userId}`
pub async fn cancel_sent_request(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> BackendResult<ApiResponse<()>> {
    state.friends.cancel_sent_request(caller.user_id, user_id).await?;
    Ok(ApiResponse::empty("Friend request cancelled"))
}

/// `DELETE /api/friends/requests/{userId}/ignore`
pub async fn ignore_received_request(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> BackendResult<ApiResponse<()>> {
    state
        .friends
        .ignore_received_request(caller.user_id, user_id)
        .await?;
    Ok(ApiResponse::empty("Friend request ignored successfully"))
}

/// `DELETE /api/friends/{userId}`
pub async fn remove_friend(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> BackendResult<ApiResponse<()>> {
    state.friends.remove_friend(caller.user_id, user_id).await?;
    Ok(ApiResponse::empty("Both of you are not friends from now"))
}

/// `GET /api/friends`
pub async fn list_friends(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> BackendResult<ApiResponse<UserList<UserSummary>>> {
    let users = state.friends.list_friends(caller.user_id).await?;
    Ok(ApiResponse::success("Fetch my friends", UserList { users }))
}

/// `GET /api/friends/requests/sent`
pub async fn list_sent_requests(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> BackendResult<ApiResponse<UserList<UserSummary>>> {
    let users = state.friends.list_sent_requests(caller.user_id).await?;
    Ok(ApiResponse::success("Fetch friends requests sent", UserList { users }))
}

/// `GET /api/friends/requests/received`
pub async fn list_received_requests(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> BackendResult<ApiResponse<UserList<UserSummary>>> {
    let users = state.friends.list_received_requests(caller.user_id).await?;
    Ok(ApiResponse::success(
        "Fetch friends requests received",
        UserList { users },
    ))
}

/// `GET /api/friends/suggestions`
pub async fn suggest_friends(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> BackendResult<ApiResponse<UserList<UserSummary>>> {
    let users = state.friends.suggest_friends(caller.user_id).await?;
    Ok(ApiResponse::success("Fetch friends suggestions", UserList { users }))
}

/// `GET /api/friends/{userId}/status`
pub async fn relationship_status(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> BackendResult<ApiResponse<Relationship>> {
    let relationship = state.friends.relationship(caller.user_id, user_id).await?;
    Ok(ApiResponse::success("Fetch relationship", relationship))
}
