//! Social Graph Types
//!
//! Data structures exchanged over the REST API:
//!
//! - `UserSummary`, `UserProfile`, `UserDetails` - user projections
//! - `Notification` - append-only event records
//! - `Relationship` - the state of a pair of users as seen by one of them
//! - `ApiResponse` - the `{ type, message, data }` envelope
//!
//! # Usage
//!
//! ```rust
//! use socialnet::shared::social::{ApiResponse, Relationship};
//!
//! let response = ApiResponse::success("Fetch relationship", Relationship::Friends);
//! assert!(response.is_success());
//! ```

pub mod envelope;
pub mod notification;
pub mod relationship;
pub mod user;

pub use envelope::{ApiResponse, ResponseType, UserData, UserList};
pub use notification::{Notification, NotificationType};
pub use relationship::Relationship;
pub use user::{FriendPreview, UserDetails, UserProfile, UserStatus, UserSummary};
