//! Transport and HTTP-level failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure originating from the network transport or the HTTP status line.
///
/// Variants are stable identifiers and never carry dynamic data; exactly one
/// is produced for a failed remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RemoteError {
    #[error("request is not authenticated")]
    Unauthorized,
    #[error("request is not permitted")]
    Forbidden,
    #[error("request was rejected as malformed")]
    BadRequest,
    #[error("requested resource does not exist")]
    NotFound,
    #[error("request conflicts with the current resource state")]
    Conflict,
    #[error("request payload is too large")]
    PayloadTooLarge,
    #[error("too many requests")]
    TooManyRequests,
    #[error("no internet connection")]
    NoInternet,
    #[error("request timed out")]
    RequestTimeout,
    #[error("secure connection could not be established")]
    SslError,
    #[error("connection refused by the remote host")]
    ConnectionRefused,
    #[error("server error")]
    ServerError,
    #[error("service unavailable")]
    ServiceUnavailable,
    #[error("response could not be decoded")]
    Serialization,
    #[error("unknown remote error")]
    Unknown,
}

crate::impl_error_code_conversions!(RemoteError {
    Unauthorized => "UNAUTHORIZED",
    Forbidden => "FORBIDDEN",
    BadRequest => "BAD_REQUEST",
    NotFound => "NOT_FOUND",
    Conflict => "CONFLICT",
    PayloadTooLarge => "PAYLOAD_TOO_LARGE",
    TooManyRequests => "TOO_MANY_REQUESTS",
    NoInternet => "NO_INTERNET",
    RequestTimeout => "REQUEST_TIMEOUT",
    SslError => "SSL_ERROR",
    ConnectionRefused => "CONNECTION_REFUSED",
    ServerError => "SERVER_ERROR",
    ServiceUnavailable => "SERVICE_UNAVAILABLE",
    Serialization => "SERIALIZATION",
    Unknown => "UNKNOWN",
});

impl RemoteError {
    /// UI-text lookup key.
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::Unauthorized => "error_unauthorized",
            Self::Forbidden => "error_forbidden",
            Self::BadRequest => "error_bad_request",
            Self::NotFound => "error_not_found",
            Self::Conflict => "error_conflict",
            Self::PayloadTooLarge => "error_payload_too_large",
            Self::TooManyRequests => "error_too_many_requests",
            Self::NoInternet => "error_no_internet",
            Self::RequestTimeout => "error_request_timeout",
            Self::SslError => "error_ssl",
            Self::ConnectionRefused => "error_connection_refused",
            Self::ServerError => "error_server",
            Self::ServiceUnavailable => "error_service_unavailable",
            Self::Serialization => "error_serialization",
            Self::Unknown => "error_unknown",
        }
    }

    /// Whether this is a 4xx-family rejection by the server.
    pub const fn is_client_rejection(&self) -> bool {
        matches!(
            self,
            Self::Unauthorized
                | Self::Forbidden
                | Self::BadRequest
                | Self::NotFound
                | Self::Conflict
                | Self::PayloadTooLarge
                | Self::TooManyRequests
        )
    }
}
