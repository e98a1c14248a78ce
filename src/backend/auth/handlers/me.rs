/**
 * Get Current User Handler
 *
 * `GET /api/auth/me` (authenticated)
 */

use axum::extract::State;

use crate::backend::auth::users::get_user;
use crate::backend::error::BackendResult;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, UserProfile};

pub async fn get_me(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> BackendResult<ApiResponse<UserProfile>> {
    let user = get_user(state.gateway.as_ref(), caller.user_id).await?;
    Ok(ApiResponse::success("Fetch current user", user.into()))
}
