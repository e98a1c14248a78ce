/**
 * Authentication Middleware
 *
 * Protects routes that require a signed-in user. The session token is
 * taken from the `Authorization: Bearer` header, or failing that from the
 * `token` cookie. The token is verified, the user is loaded, and an
 * [`AuthenticatedUser`] is attached to the request extensions for the
 * [`AuthUser`] extractor.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::auth::sessions::{verify_token, TOKEN_COOKIE};
use crate::backend::error::{BackendError, BackendResult};
use crate::backend::server::state::AppState;

/// Caller identity resolved by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Authentication middleware
///
/// Rejects with 401 when the token is missing, invalid or expired, or when
/// its user no longer exists.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> BackendResult<Response> {
    let token = extract_token(request.headers()).ok_or_else(|| {
        tracing::warn!("Missing session token");
        BackendError::unauthenticated("missing session token")
    })?;

    let claims = verify_token(&token, &state.config.jwt_secret).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthenticated("invalid session token")
    })?;
    let user_id = claims.user_id()?;

    let mut tx = state.gateway.begin().await?;
    let user = tx.find_user(user_id).await?.ok_or_else(|| {
        tracing::warn!("Token for unknown user: {}", user_id);
        BackendError::unauthenticated("unknown user")
    })?;
    tx.commit().await?;

    request.extensions_mut().insert(AuthenticatedUser {
        user_id: user.id,
        email: user.email,
    });

    Ok(next.run(request).await)
}

/// Bearer header first, then the session cookie
fn extract_token(headers: &HeaderMap) -> Option<String> {
    let bearer = headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty());
    if let Some(token) = bearer {
        return Some(token.to_string());
    }

    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == TOKEN_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

/// Axum extractor for the authenticated user
///
/// Only meaningful behind [`auth_middleware`]; elsewhere it rejects with
/// 401.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = BackendError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthenticated("no authenticated user")
            })?;

        Ok(AuthUser(user))
    }
}
