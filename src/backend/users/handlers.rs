//! User HTTP Handlers
//!
//! - `PATCH /api/users/profile_pic` - update the caller's images
//! - `GET /api/users/{userId}` - profile page with the first five friends
//! - `GET /api/users/{userId}/friends` - that user's friends

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};
use crate::backend::friends::manager::friend_previews;
use crate::backend::gateway::UserUpdate;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::social::{UserData, UserDetails, UserList};
use crate::shared::{ApiResponse, FriendPreview};

/// Friends shown on a profile page
const DETAILS_PREVIEW_LEN: i64 = 5;

/// Image URLs to store; a missing field keeps the current image
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileImagesRequest {
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
}

pub async fn update_profile_images(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(request): Json<ProfileImagesRequest>,
) -> BackendResult<ApiResponse<()>> {
    let mut tx = state.gateway.begin().await?;
    tx.update_user(
        caller.user_id,
        UserUpdate {
            profile_image: request.profile_image,
            cover_image: request.cover_image,
            status: None,
        },
    )
    .await?
    .ok_or(BackendError::UserNotFound)?;
    tx.commit().await?;

    tracing::debug!("Profile images updated for {}", caller.user_id);
    Ok(ApiResponse::empty("Profile pic uploaded successfully"))
}

pub async fn get_user_details(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> BackendResult<ApiResponse<UserData<UserDetails>>> {
    let mut tx = state.gateway.begin().await?;
    let user = tx.find_user(user_id).await?.ok_or(BackendError::UserNotFound)?;
    let friends_preview = friend_previews(tx.as_mut(), user.id, DETAILS_PREVIEW_LEN).await?;
    let friend_count = tx.friend_count(user.id).await?;
    tx.commit().await?;

    let details = UserDetails {
        id: user.id,
        first_name: user.first_name,
        last_name: user.last_name,
        profile_image: user.profile_image,
        cover_image: user.cover_image,
        friends_preview,
        friend_count,
    };
    Ok(ApiResponse::success("Fetch user details", UserData { user: details }))
}

pub async fn get_user_friends(
    State(state): State<AppState>,
    AuthUser(_caller): AuthUser,
    Path(user_id): Path<Uuid>,
) -> BackendResult<ApiResponse<UserList<FriendPreview>>> {
    let mut tx = state.gateway.begin().await?;
    if tx.find_user(user_id).await?.is_none() {
        return Err(BackendError::UserNotFound);
    }
    let users = tx
        .friends_of(user_id, None)
        .await?
        .into_iter()
        .map(|friend| FriendPreview {
            id: friend.id,
            first_name: friend.first_name,
            profile_image: friend.profile_image,
        })
        .collect();
    tx.commit().await?;

    Ok(ApiResponse::success("Fetch user friends", UserList { users }))
}
