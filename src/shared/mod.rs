//! Shared Module
//!
//! This module contains types and data structures that are shared between
//! the backend and its HTTP clients. These types are serialized into the
//! JSON response envelope and are free of any database or framework types.
//!
//! # Overview
//!
//! - `social` - users, notifications, relationship states, response envelope
//! - `error` - input validation errors
//! - `config` - application configuration and its builder

/// Social graph wire types
pub mod social;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use social::{
    ApiResponse, FriendPreview, Notification, NotificationType, Relationship, ResponseType,
    UserProfile, UserStatus, UserSummary,
};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
