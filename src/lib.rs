//! socialnet - social network backend
//!
//! The core of the crate is the friend relationship manager: sending,
//! accepting, cancelling and ignoring friend requests, unfriending, and the
//! friend, request and suggestion lists. Around it sit signup and login
//! with JWT sessions, profile pages and a notification log.
//!
//! # Module Structure
//!
//! - **`shared`** - wire types returned by the API (users, notifications,
//!   relationship states, the `{ type, message, data }` envelope),
//!   configuration and validation errors
//! - **`backend`** - the Axum server, persistence gateway and handlers
//!
//! # Usage
//!
//! ```rust,no_run
//! use socialnet::backend::server::create_app;
//! use socialnet::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let app = create_app(AppConfig::default()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Consistency
//!
//! Relationship state lives only in the database. Each friend transition
//! reads the pair's state, writes both users' edges and appends a
//! notification in a single serializable transaction, so concurrent
//! requests on the same pair can never leave one side out of sync.

/// Shared types and data structures
pub mod shared;

/// Backend server-side code
pub mod backend;
