//! Device and storage failures.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure originating on the device (storage, local balances).
///
/// Never produced by the safe-call pipeline; it shares the error capability
/// so repositories can surface it through the same channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LocalError {
    #[error("device storage is full")]
    DiskFull,
    #[error("record not found")]
    NotFound,
    #[error("insufficient funds")]
    InsufficientFunds,
    #[error("unknown local error")]
    Unknown,
}

crate::impl_error_code_conversions!(LocalError {
    DiskFull => "DISK_FULL",
    NotFound => "NOT_FOUND",
    InsufficientFunds => "INSUFFICIENT_FUNDS",
    Unknown => "UNKNOWN",
});

impl LocalError {
    /// UI-text lookup key.
    pub const fn message_key(&self) -> &'static str {
        match self {
            Self::DiskFull => "error_disk_full",
            Self::NotFound => "error_local_not_found",
            Self::InsufficientFunds => "error_insufficient_funds",
            Self::Unknown => "error_local_unknown",
        }
    }
}
