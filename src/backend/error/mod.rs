//! Backend Error Module
//!
//! This module defines the error taxonomy of the backend server. Every
//! handler returns `Result<_, BackendError>`, and the error is rendered into
//! the shared `{ type: "error", message, data: null }` envelope.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions and status mapping
//! └── conversion.rs - IntoResponse for errors and for the success envelope
//! ```
//!
//! # Status Mapping
//!
//! - Relationship guard failures (`AlreadyRequested`, `RequestNotFound`,
//!   `AlreadyFriends`, `NotFriends`, `SelfRelationship`) - 400
//! - `Unauthenticated` - 401
//! - `UserNotFound`, `NotFound` - 404
//! - `Conflict` - 409
//! - storage, token and hashing failures - 500 with an opaque message

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

// Re-export commonly used types
pub use types::{BackendError, BackendResult};
