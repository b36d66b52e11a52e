//! Error classification shared by every error family
//!
//! Error types across the workspace implement [`ErrorClassification`] so that
//! callers can make the same three decisions regardless of where a failure
//! came from:
//!
//! - **`is_retryable()`**: can the operation be attempted again unchanged?
//! - **`severity()`**: which log level should report it?
//! - **`retry_after()`**: does the error suggest a specific delay?
//!
//! ## ErrorSeverity Levels
//!
//! | Level | Use Case | Examples |
//! |-------|----------|----------|
//! | **Debug** | Expected, environmental, user-fixable | Offline, timeouts, form validation |
//! | **Info** | Expected business outcomes | KYC required, limit reached |
//! | **Warning** | Rejected requests worth monitoring | 4xx responses, expired sessions |
//! | **Error** | Unexpected or environmental faults | 5xx, TLS failures, contract drift |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//!
//! use coinfolio_common::error::{ErrorClassification, ErrorSeverity};
//!
//! #[derive(Debug)]
//! enum FeedError {
//!     Offline,
//!     Corrupt,
//! }
//!
//! impl ErrorClassification for FeedError {
//!     fn is_retryable(&self) -> bool {
//!         matches!(self, Self::Offline)
//!     }
//!
//!     fn severity(&self) -> ErrorSeverity {
//!         match self {
//!             Self::Offline => ErrorSeverity::Debug,
//!             Self::Corrupt => ErrorSeverity::Error,
//!         }
//!     }
//! }
//!
//! assert!(FeedError::Offline.is_retryable());
//! assert_eq!(FeedError::Corrupt.retry_after(), None::<Duration>);
//! ```

use std::fmt;
use std::time::Duration;

/// Standard interface for classifying errors by their characteristics
pub trait ErrorClassification {
    /// Check if this error is retryable
    ///
    /// Retryable errors are transient: the same request may succeed if sent
    /// again without any change by the user.
    fn is_retryable(&self) -> bool;

    /// Get the error severity level
    ///
    /// Used for logging and monitoring decisions.
    fn severity(&self) -> ErrorSeverity;

    /// Get the suggested retry delay if applicable
    fn retry_after(&self) -> Option<Duration> {
        None
    }
}

/// Error severity levels for logging and monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Expected condition, only interesting while debugging
    Debug,
    /// Informational, an expected outcome
    Info,
    /// Warning, should be monitored
    Warning,
    /// Error, requires attention
    Error,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warning => "WARN",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
