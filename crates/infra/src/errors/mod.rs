//! Infrastructure errors and conversions from external library errors.

mod conversions;

use thiserror::Error;

pub use conversions::transport_error_from_reqwest;

/// Failure to set up infrastructure. Request failures never use this type;
/// they are classified into `DataError` by the safe-call pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InfraError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP client error: {0}")]
    Client(String),
}

pub type InfraResult<T> = Result<T, InfraError>;
