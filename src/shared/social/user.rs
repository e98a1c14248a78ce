//! User projections returned by the API.
//!
//! None of these types carry the password hash; the database row type lives
//! in the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Presence status, flipped by login and logout
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    /// User has an active session
    Active,
    /// User is logged out
    #[default]
    Inactive,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "ACTIVE" => Some(UserStatus::Active),
            "INACTIVE" => Some(UserStatus::Inactive),
            _ => None,
        }
    }
}

/// Minimal friend entry shown next to a user (avatar strip)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FriendPreview {
    pub id: Uuid,
    pub first_name: String,
    pub profile_image: Option<String>,
}

/// A user as listed in friends, request and suggestion lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserSummary {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<String>,
    pub status: UserStatus,
    /// The first few of this user's friends
    pub friends_preview: Vec<FriendPreview>,
    /// Total number of this user's friends
    pub friend_count: i64,
}

/// The caller's own profile
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub status: UserStatus,
    pub created_at: DateTime<Utc>,
}

/// Public profile page of any user
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDetails {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub profile_image: Option<String>,
    pub cover_image: Option<String>,
    pub friends_preview: Vec<FriendPreview>,
    pub friend_count: i64,
}
