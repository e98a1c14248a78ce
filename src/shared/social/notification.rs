//! Notification Data Structure
//!
//! Notifications are written as a side effect of relationship transitions and
//! are never updated except for the read flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Category of a notification
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationType {
    /// Friend request lifecycle and unfriending
    Friend,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::Friend => "FRIEND",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "FRIEND" => Some(NotificationType::Friend),
            _ => None,
        }
    }
}

/// A stored notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    /// Monotonic id, also the insertion order
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    /// User whose action produced the notification
    pub from_user_id: Uuid,
    /// User the notification is addressed to
    pub to_user_id: Uuid,
    /// Human-readable description, e.g. "sent a friend request"
    pub content: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
