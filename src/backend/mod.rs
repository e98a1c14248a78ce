//! Backend Module
//!
//! The HTTP server of the social network.
//!
//! - **`server`** - initialization and application state
//! - **`routes`** - route configuration and router assembly
//! - **`middleware`** - the session token gate
//! - **`auth`** - signup, login, logout, session tokens
//! - **`friends`** - the friend relationship manager and its handlers
//! - **`users`** - profile pages and images
//! - **`notifications`** - reading and acknowledging notifications
//! - **`gateway`** - transactional access to PostgreSQL or SQLite
//! - **`error`** - `BackendError` and its HTTP rendering
//!
//! # Request Lifecycle
//!
//! A request passes `TraceLayer`, then (for protected routes) the auth
//! middleware, then its handler. Handlers that change relationships go
//! through [`friends::FriendManager`], which runs every transition in one
//! gateway transaction. Errors come back as `BackendError` and are rendered
//! as the `{ type: "error", message, data: null }` envelope.

/// Server setup and configuration
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and user accounts
pub mod auth;

/// Middleware for request processing
pub mod middleware;

/// Persistence gateway
pub mod gateway;

/// Friend relationship manager
pub mod friends;

/// User profile endpoints
pub mod users;

/// Notification endpoints
pub mod notifications;

pub use error::{BackendError, BackendResult};
pub use friends::FriendManager;
pub use server::create_app;
