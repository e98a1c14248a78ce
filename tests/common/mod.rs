//! Common test utilities and helpers
//!
//! - In-memory database fixture
//! - Router driver for HTTP tests
//! - Authentication helpers
//! - Custom assertion macros

pub mod assertions;

pub use app::*;
pub use assertions::*;
pub use auth_helpers::*;
pub use database::*;
