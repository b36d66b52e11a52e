//! Transport ports and the transport exception classifier
//!
//! Adapters translate their HTTP library's failures into [`TransportError`];
//! [`classify_transport_error`] then turns every variant into exactly one
//! [`RemoteError`], except cancellation which is handed back as
//! [`Cancelled`] and must be propagated untouched.
//!
//! ## Classification rules (in priority order)
//! 1. `Cancelled` → re-raised
//! 2. Timeouts (socket, request, connect) → `RequestTimeout`
//! 3. Unresolved address / DNS failure → `NoInternet`
//! 4. Generic I/O: lowercased message containing `ssl`, `certificate` or
//!    `handshake` → `SslError`; containing `refused` or `reset` →
//!    `ConnectionRefused`; otherwise `NoInternet`
//! 5. Anything else → `Unknown`, unless the caller's token was cancelled in
//!    the meantime

use async_trait::async_trait;
use coinfolio_domain::RemoteError;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Cancellation signal. Never converted into a [`RemoteError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("operation cancelled")]
pub struct Cancelled;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeoutKind {
    Socket,
    Request,
    Connect,
}

/// Failure raised by the underlying HTTP transport.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("operation cancelled")]
    Cancelled,

    #[error("{kind:?} timeout: {message}")]
    Timeout { kind: TimeoutKind, message: String },

    #[error("unresolved address: {message}")]
    UnresolvedAddress { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("transport error: {message}")]
    Other { message: String },
}

impl TransportError {
    pub fn timeout(kind: TimeoutKind, message: impl Into<String>) -> Self {
        Self::Timeout { kind, message: message.into() }
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::Io { message: message.into() }
    }

    pub fn unresolved(message: impl Into<String>) -> Self {
        Self::UnresolvedAddress { message: message.into() }
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other { message: message.into() }
    }
}

/// Response handed back by the transport once the status line is known.
#[async_trait]
pub trait HttpResponse: Send {
    fn status(&self) -> u16;

    /// Read the whole body as text. Called at most once per response.
    async fn text(self) -> Result<String, TransportError>;
}

/// Map a transport failure onto the remote error taxonomy.
///
/// # Errors
///
/// Returns [`Cancelled`] for [`TransportError::Cancelled`], and for
/// unclassifiable failures observed after `cancellation` fired.
pub fn classify_transport_error(
    error: &TransportError,
    cancellation: Option<&CancellationToken>,
) -> Result<RemoteError, Cancelled> {
    let remote = match error {
        TransportError::Cancelled => return Err(Cancelled),
        TransportError::Timeout { .. } => RemoteError::RequestTimeout,
        TransportError::UnresolvedAddress { .. } => RemoteError::NoInternet,
        TransportError::Io { message } => classify_io_message(message),
        TransportError::Other { .. } => {
            if cancellation.is_some_and(CancellationToken::is_cancelled) {
                return Err(Cancelled);
            }
            RemoteError::Unknown
        }
    };

    debug!(error = %error, remote = remote.code(), "classified transport failure");
    Ok(remote)
}

fn classify_io_message(message: &str) -> RemoteError {
    let lower = message.to_lowercase();
    if ["ssl", "certificate", "handshake"].iter().any(|needle| lower.contains(*needle)) {
        RemoteError::SslError
    } else if lower.contains("refused") || lower.contains("reset") {
        RemoteError::ConnectionRefused
    } else {
        RemoteError::NoInternet
    }
}
