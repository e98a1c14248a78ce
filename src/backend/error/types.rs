/**
 * Backend Error Types
 *
 * Request-level failures carry a human-readable message and map to a 4xx
 * status. Storage, token and hashing failures keep their source for the logs
 * and are reported to the client as an opaque 500.
 *
 * None of the request-level failures are retried. Storage conflicts raised
 * while a transition's transaction is open are retried by the friend manager
 * (see `is_storage_conflict`).
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::gateway::is_conflict;
use crate::shared::SharedError;

/// Result alias used by handlers, the manager and the gateway
pub type BackendResult<T> = Result<T, BackendError>;

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// A pending request already exists for the pair
    #[error("{0}")]
    AlreadyRequested(String),

    /// The pending request the operation acts on does not exist
    #[error("{0}")]
    RequestNotFound(String),

    /// The pair is already friends
    #[error("Both of you are already friends")]
    AlreadyFriends,

    /// The pair is not friends
    #[error("Both of you are not friends")]
    NotFriends,

    /// Actor and target are the same user
    #[error("You cannot send friend requests to yourself")]
    SelfRelationship,

    /// Target user does not exist
    #[error("User not found")]
    UserNotFound,

    /// Any other missing resource (e.g. a notification of another user)
    #[error("{0}")]
    NotFound(String),

    /// Missing, malformed or expired credentials
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// Login with an unknown email or a wrong password
    #[error("{0}")]
    InvalidCredentials(String),

    /// Unique field already taken (e.g. email on signup)
    #[error("{0}")]
    Conflict(String),

    /// Validation error from the shared module
    #[error(transparent)]
    SharedError(#[from] SharedError),

    /// Storage or transaction failure
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Session token could not be issued
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Password could not be hashed or verified
    #[error("Password hash error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    /// Anything else that should never reach the client verbatim
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BackendError {
    pub fn already_requested(message: impl Into<String>) -> Self {
        Self::AlreadyRequested(message.into())
    }

    pub fn request_not_found(message: impl Into<String>) -> Self {
        Self::RequestNotFound(message.into())
    }

    pub fn unauthenticated(reason: impl Into<String>) -> Self {
        Self::Unauthenticated(reason.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::AlreadyRequested(_)
            | Self::RequestNotFound(_)
            | Self::AlreadyFriends
            | Self::NotFriends
            | Self::SelfRelationship
            | Self::InvalidCredentials(_) => StatusCode::BAD_REQUEST,
            Self::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            Self::UserNotFound | Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::SharedError(SharedError::ValidationError { .. }) => StatusCode::BAD_REQUEST,
            Self::Database(_) | Self::Token(_) | Self::PasswordHash(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message shown to the client
    ///
    /// Server errors are reported without detail; the source is logged by
    /// the response conversion.
    pub fn message(&self) -> String {
        if self.status_code().is_server_error() {
            return "Internal server error".to_string();
        }
        match self {
            Self::Unauthenticated(_) => "Authentication required".to_string(),
            Self::SharedError(SharedError::ValidationError { message, .. }) => message.clone(),
            other => other.to_string(),
        }
    }

    /// True for serialization failures, deadlocks and busy databases that a
    /// fresh transaction may get past
    pub fn is_storage_conflict(&self) -> bool {
        matches!(self, Self::Database(err) if is_conflict(err))
    }
}
