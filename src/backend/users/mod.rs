//! User Profiles
//!
//! Profile pages and image updates under `/api/users`.

pub mod handlers;
