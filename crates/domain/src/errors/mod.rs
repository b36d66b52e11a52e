//! Error taxonomy shared by every data-layer operation
//!
//! Three disjoint families make up [`DataError`]:
//! - [`RemoteError`]: network transport and HTTP status failures
//! - [`LocalError`]: device and storage failures
//! - [`BusinessError`]: API-level rule violations carried in 2xx bodies
//!
//! Remote and local errors are closed, payload-free enumerations. Business
//! errors are tagged variants with optional context. Every type implements
//! [`DomainError`] and [`ErrorClassification`], which callers use to pick a
//! log level, a UI message key, and a retry decision.

mod business;
mod local;
mod remote;

use std::time::Duration;

pub use business::BusinessError;
use coinfolio_common::error::{ErrorClassification, ErrorSeverity};
pub use local::LocalError;
pub use remote::RemoteError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Capability marker implemented by every concrete error kind.
pub trait DomainError: std::error::Error + Send + Sync + 'static {}

impl DomainError for RemoteError {}
impl DomainError for LocalError {}
impl DomainError for BusinessError {}
impl DomainError for DataError {}

/// Unified data-layer error.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "family", content = "error", rename_all = "snake_case")]
pub enum DataError {
    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Local(#[from] LocalError),

    #[error(transparent)]
    Business(#[from] BusinessError),
}

/// Result alias for data-layer operations.
pub type DataResult<T> = Result<T, DataError>;

impl DataError {
    /// Stable code of the wrapped error.
    pub fn code(&self) -> &str {
        match self {
            Self::Remote(e) => e.code(),
            Self::Local(e) => e.code(),
            Self::Business(e) => e.code(),
        }
    }

    /// UI-text lookup key of the wrapped error.
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::Remote(e) => e.message_key(),
            Self::Local(e) => e.message_key(),
            Self::Business(e) => e.message_key(),
        }
    }

    pub const fn as_remote(&self) -> Option<RemoteError> {
        match self {
            Self::Remote(e) => Some(*e),
            _ => None,
        }
    }

    pub const fn as_business(&self) -> Option<&BusinessError> {
        match self {
            Self::Business(e) => Some(e),
            _ => None,
        }
    }
}

impl ErrorClassification for RemoteError {
    fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::NoInternet | Self::RequestTimeout | Self::ServiceUnavailable | Self::ServerError
        )
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            rejection if rejection.is_client_rejection() => ErrorSeverity::Warning,
            Self::NoInternet | Self::RequestTimeout => ErrorSeverity::Debug,
            Self::ConnectionRefused => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::TooManyRequests => Some(Duration::from_secs(60)),
            _ => None,
        }
    }
}

impl ErrorClassification for LocalError {
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound | Self::InsufficientFunds => ErrorSeverity::Warning,
            Self::DiskFull | Self::Unknown => ErrorSeverity::Error,
        }
    }
}

impl ErrorClassification for BusinessError {
    /// Business errors need user action before a retry can succeed.
    fn is_retryable(&self) -> bool {
        false
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::ValidationFailed { .. } => ErrorSeverity::Debug,
            Self::SessionExpired { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Info,
        }
    }
}

impl ErrorClassification for DataError {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Remote(e) => e.is_retryable(),
            Self::Local(e) => e.is_retryable(),
            Self::Business(e) => e.is_retryable(),
        }
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Remote(e) => e.severity(),
            Self::Local(e) => e.severity(),
            Self::Business(e) => e.severity(),
        }
    }

    fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Remote(e) => e.retry_after(),
            Self::Local(e) => e.retry_after(),
            Self::Business(e) => e.retry_after(),
        }
    }
}
