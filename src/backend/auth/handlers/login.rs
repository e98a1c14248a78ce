/**
 * Login Handler
 *
 * `POST /api/auth/login`
 *
 * Unknown email and wrong password are reported separately with 400
 * ("Incorrect email address" / "Incorrect password"). On success the user
 * is marked `ACTIVE`, the token is returned in the body and set as an
 * `HttpOnly; SameSite=Strict` cookie, and the status is 201.
 */

use axum::{
    extract::State,
    http::{header::SET_COOKIE, HeaderName, StatusCode},
    Json,
};

use crate::backend::auth::handlers::types::{AuthResponse, LoginRequest};
use crate::backend::auth::sessions::{create_token, session_cookie};
use crate::backend::auth::users::{authenticate, set_status};
use crate::backend::error::BackendResult;
use crate::backend::server::state::AppState;
use crate::shared::{ApiResponse, UserStatus};

pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> BackendResult<(StatusCode, [(HeaderName, String); 1], ApiResponse<AuthResponse>)> {
    tracing::info!("Login request for: {}", request.email);

    let user = authenticate(state.gateway.as_ref(), &request.email, &request.password).await?;
    let token = create_token(
        user.id,
        &user.email,
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )?;
    let user = set_status(state.gateway.as_ref(), user.id, UserStatus::Active).await?;

    tracing::info!("User logged in: {} ({})", user.id, user.email);

    Ok((
        StatusCode::CREATED,
        [(SET_COOKIE, session_cookie(&token, state.config.token_ttl_secs))],
        ApiResponse::success(
            "You have logged in successfully",
            AuthResponse {
                token,
                user: user.into(),
            },
        ),
    ))
}
