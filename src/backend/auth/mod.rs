//! Authentication Module
//!
//! User registration, login and session tokens.
//!
//! - **`users`** - account operations over the gateway
//! - **`sessions`** - JWT creation, verification and the session cookie
//! - **`handlers`** - HTTP handlers for `/api/auth`
//!
//! # Authentication Flow
//!
//! 1. **Signup**: names, email and password → user created → token returned
//! 2. **Login**: email and password → user marked `ACTIVE` → token returned
//!    and set as the `token` cookie
//! 3. **Authenticated requests**: `Authorization: Bearer <token>` or the
//!    cookie, checked by [`crate::backend::middleware::auth`]
//! 4. **Logout**: user marked `INACTIVE`, cookie cleared
//!
//! Passwords are stored as bcrypt hashes and never leave the backend.

/// Account operations
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::types::{AuthResponse, LoginRequest, SignupRequest};
pub use handlers::{get_me, login, logout, signup};
