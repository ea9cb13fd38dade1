//! Errors are thirtyfour's. This module adds the classification the wait
//! layer needs on top of them.

use std::time::Duration;

use serde_json::json;
pub use thirtyfour::error::{WebDriverError, WebDriverResult};

/// How a failed WebDriver call should be treated while polling.
pub trait ErrorClass {
    /// True for errors that only mean "not there (yet)".
    fn is_transient(&self) -> bool;

    /// True when a wait, or the server, gave up in time.
    fn is_timeout(&self) -> bool;
}

impl ErrorClass for WebDriverError {
    fn is_transient(&self) -> bool {
        matches!(
            self,
            WebDriverError::NoSuchElement(_) | WebDriverError::StaleElementReference(_)
        )
    }

    fn is_timeout(&self) -> bool {
        matches!(self, WebDriverError::Timeout(_))
    }
}

/// The error a required wait fails with.
pub fn timed_out(description: &str, elapsed: Duration) -> WebDriverError {
    WebDriverError::Timeout(format!("timed out after {:?} waiting for {}", elapsed, description))
}

/// Build the error a W3C server would return for `error` with `message`.
pub fn w3c_error(status: u16, error: &str, message: &str) -> WebDriverError {
    let body = json!({ "value": { "error": error, "message": message, "stacktrace": "" } });
    WebDriverError::parse(status, body.to_string())
}
