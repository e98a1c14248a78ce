/**
 * Signup Handler
 *
 * `POST /api/auth/signup`
 *
 * Validates the fields, rejects an email that is already registered with
 * 409, stores the bcrypt hash and answers 201 with a session token so the
 * client is signed in right away.
 *
 * ```json
 * {
 *   "type": "success",
 *   "message": "Account created successfully",
 *   "data": { "token": "eyJhbGciOi...", "user": { "id": "...", "status": "INACTIVE" } }
 * }
 * ```
 */

use axum::{extract::State, http::StatusCode, Json};

use crate::backend::auth::handlers::types::{AuthResponse, SignupRequest};
use crate::backend::auth::sessions::create_token;
use crate::backend::auth::users::register;
use crate::backend::error::BackendResult;
use crate::backend::server::state::AppState;
use crate::shared::ApiResponse;

pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> BackendResult<(StatusCode, ApiResponse<AuthResponse>)> {
    tracing::info!("Signup request for email: {}", request.email);

    let user = register(state.gateway.as_ref(), request, state.config.bcrypt_cost).await?;
    let token = create_token(
        user.id,
        &user.email,
        &state.config.jwt_secret,
        state.config.token_ttl_secs,
    )?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::success(
            "Account created successfully",
            AuthResponse {
                token,
                user: user.into(),
            },
        ),
    ))
}
