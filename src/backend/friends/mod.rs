//! Friend System
//!
//! - [`manager`] - the relationship state machine and its queries
//! - [`handlers`] - the `/api/friends` HTTP surface

pub mod handlers;
pub mod manager;

pub use manager::FriendManager;
