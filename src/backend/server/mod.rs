//! Server Module
//!
//! - **`state`** - `AppState` and its `FromRef` implementations
//! - **`config`** - opening the persistence gateway
//! - **`init`** - building the application router
//!
//! # Example
//!
//! ```rust,no_run
//! use socialnet::backend::server::create_app;
//! use socialnet::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::from_env()?;
//! let app = create_app(config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Gateway loading
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, create_app_with_gateway};
pub use state::AppState;
