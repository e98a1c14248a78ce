//! Notifications
//!
//! Friend transitions append notifications inside their own transaction
//! (see [`crate::backend::friends::manager`]). This module only reads them
//! and marks them read; nothing ever deletes one.

pub mod handlers;
