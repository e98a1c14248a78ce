//! Integration tests
//!
//! HTTP tests drive the full router; database tests check the schema.

mod api;
