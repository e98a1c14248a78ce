//! Custom assertion macros and utilities
//!
//! Envelope checks for HTTP tests plus a few general-purpose macros.

use axum::http::StatusCode;

use super::app::TestResponse;

/// Assert that a result is ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $message:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $message, e),
        }
    };
}

/// Assert that a string contains a substring
#[macro_export]
macro_rules! assert_contains {
    ($haystack:expr, $needle:expr) => {
        assert!(
            $haystack.contains($needle),
            "Expected '{}' to contain '{}'",
            $haystack,
            $needle
        );
    };
}

/// Assert a success envelope with the given status and message
#[track_caller]
pub fn assert_success(response: &TestResponse, status: StatusCode, message: &str) {
    assert_eq!(
        response.status, status,
        "unexpected status, body: {}",
        response.body
    );
    assert_eq!(response.kind(), "success", "body: {}", response.body);
    assert_eq!(response.message(), message);
}

/// Assert an error envelope with the given status; `data` must be null
#[track_caller]
pub fn assert_error(response: &TestResponse, status: StatusCode) {
    assert_eq!(
        response.status, status,
        "unexpected status, body: {}",
        response.body
    );
    assert_eq!(response.kind(), "error", "body: {}", response.body);
    assert!(response.body["data"].is_null());
}
