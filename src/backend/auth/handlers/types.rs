/**
 * Authentication Handler Types
 *
 * Request and response bodies of the `/api/auth` endpoints. Responses are
 * wrapped in the `{ type, message, data }` envelope.
 */

use serde::{Deserialize, Serialize};

use crate::shared::UserProfile;

/// Sign up request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct SignupRequest {
    /// 1-50 characters
    pub first_name: String,
    /// 1-50 characters
    pub last_name: String,
    /// Unique, must contain '@'
    pub email: String,
    /// At least 8 characters, hashed before storage
    pub password: String,
}

/// Login request
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `data` of a successful signup or login
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct AuthResponse {
    /// Session token, also usable as `Authorization: Bearer <token>`
    pub token: String,
    pub user: UserProfile,
}
