//! Middleware Module
//!
//! - **`auth`** - session token check for protected routes
//!
//! Protected routes are grouped behind
//! `axum::middleware::from_fn_with_state(state, auth_middleware)` as a
//! route layer, see [`crate::backend::routes::api_routes`].

pub mod auth;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
