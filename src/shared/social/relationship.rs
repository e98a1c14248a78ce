//! Relationship state between two users, seen from one side.

use serde::{Deserialize, Serialize};

/// Where a pair of users stands, from the point of view of the first user
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    /// No request and no friendship
    None,
    /// The viewer has a pending request out to the other user
    RequestSent,
    /// The other user has a pending request out to the viewer
    RequestReceived,
    /// Confirmed friends
    Friends,
}

impl Relationship {
    /// True while a request is pending in either direction
    pub fn is_pending(&self) -> bool {
        matches!(self, Relationship::RequestSent | Relationship::RequestReceived)
    }
}
