//! Route Configuration Module
//!
//! - **`router`** - top-level router: `/api` nest, tracing, 404 fallback
//! - **`api_routes`** - every `/api` endpoint, public and protected
//!
//! # Example
//!
//! ```rust,no_run
//! use socialnet::backend::gateway::SqliteGateway;
//! use socialnet::backend::routes::create_router;
//! use socialnet::backend::server::state::AppState;
//! use socialnet::shared::AppConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = Arc::new(SqliteGateway::in_memory().await?);
//! let router = create_router(AppState::new(gateway, AppConfig::default()));
//! # Ok(())
//! # }
//! ```

/// Main router creation
pub mod router;

/// API endpoint routes
pub mod api_routes;

pub use router::create_router;
