/**
 * Session Management and JWT Tokens
 *
 * Session tokens are HS256 JWTs signed with the configured secret. The
 * token travels either in an `Authorization: Bearer` header or in the
 * `token` cookie set at login.
 */

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::backend::error::{BackendError, BackendResult};

/// Name of the session cookie
pub const TOKEN_COOKIE: &str = "token";

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User ID
    pub sub: String,
    /// Email
    pub email: String,
    /// Issued at time (Unix timestamp)
    pub iat: u64,
    /// Expiration time (Unix timestamp)
    pub exp: u64,
}

impl Claims {
    pub fn user_id(&self) -> BackendResult<Uuid> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| BackendError::unauthenticated("malformed subject in token"))
    }
}

/// Create a JWT token for a user, valid for `ttl_secs`
pub fn create_token(
    user_id: Uuid,
    email: &str,
    secret: &str,
    ttl_secs: u64,
) -> BackendResult<String> {
    let now = chrono::Utc::now().timestamp().max(0) as u64;

    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + ttl_secs,
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::default(), &claims, &key)?)
}

/// Verify signature and expiry, and decode the claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let token_data = decode::<Claims>(token, &key, &Validation::default())?;
    Ok(token_data.claims)
}

/// `Set-Cookie` value carrying a fresh session token
pub fn session_cookie(token: &str, ttl_secs: u64) -> String {
    format!(
        "{}={}; HttpOnly; SameSite=Strict; Max-Age={}; Path=/",
        TOKEN_COOKIE, token, ttl_secs
    )
}

/// `Set-Cookie` value that removes the session cookie
pub fn expired_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Strict; Max-Age=0; Path=/", TOKEN_COOKIE)
}
