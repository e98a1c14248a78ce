//! Response Envelope
//!
//! Every endpoint answers with the same JSON shape:
//!
//! ```json
//! { "type": "success", "message": "Fetch my friends", "data": { "users": [] } }
//! ```
//!
//! Errors use `"type": "error"` and `"data": null`.

use serde::{Deserialize, Serialize};

/// Outcome marker of an envelope
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Success,
    Error,
}

/// Uniform `{ type, message, data }` response body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Successful response carrying a payload
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            response_type: ResponseType::Success,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Successful response with `data: null`
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Success,
            message: message.into(),
            data: None,
        }
    }

    /// Error response, always with `data: null`
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Error,
            message: message.into(),
            data: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.response_type == ResponseType::Success
    }
}

/// `{ "users": [...] }` payload used by every user list endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserList<T> {
    pub users: Vec<T>,
}

/// `{ "user": {...} }` payload of single-user endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserData<T> {
    pub user: T,
}
