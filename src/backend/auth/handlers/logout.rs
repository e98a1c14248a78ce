/**
 * Logout Handler
 *
 * `POST /api/auth/logout` (authenticated)
 *
 * Marks the caller `INACTIVE` and expires the session cookie. Tokens are
 * stateless, so a copied bearer token stays valid until it expires.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderName},
};

use crate::backend::auth::sessions::expired_cookie;
use crate::backend::auth::users::set_status;
use crate::backend::error::BackendResult;
use crate::backend::middleware::auth::AuthUser;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, UserStatus};

pub async fn logout(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> BackendResult<([(HeaderName, String); 1], ApiResponse<()>)> {
    set_status(state.gateway.as_ref(), caller.user_id, UserStatus::Inactive).await?;
    tracing::info!("User logged out: {} ({})", caller.user_id, caller.email);

    Ok((
        [(SET_COOKIE, expired_cookie())],
        ApiResponse::empty("You have logged out successfully"),
    ))
}
