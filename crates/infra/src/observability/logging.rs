//! Tracing helpers for classified errors
//!
//! ```rust,no_run
//! use coinfolio_common::ResultExt;
//! use coinfolio_domain::{DataResult, RemoteError};
//! use coinfolio_infra::log_data_error;
//!
//! let outcome: DataResult<u32> = Err(RemoteError::ServerError.into());
//! let _ = outcome.on_error(|e| log_data_error("portfolio.refresh", e));
//! ```

use coinfolio_common::error::{ErrorClassification, ErrorSeverity};
use coinfolio_domain::DataError;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

/// Emit one event for `err` at the level its severity calls for.
pub fn log_data_error(context: &str, err: &DataError) {
    let error_code = err.code();
    let message_key = err.message_key();
    let retryable = err.is_retryable();
    let family = error_label(err);

    match err.severity() {
        ErrorSeverity::Debug => {
            debug!(context, family, error_code, message_key, retryable, error = %err, "data call failed");
        }
        ErrorSeverity::Info => {
            info!(context, family, error_code, message_key, retryable, error = %err, "data call failed");
        }
        ErrorSeverity::Warning => {
            warn!(context, family, error_code, message_key, retryable, error = %err, "data call failed");
        }
        ErrorSeverity::Error => {
            error!(context, family, error_code, message_key, retryable, error = %err, "data call failed");
        }
    }
}

/// Family name of `err`, for log fields and metric labels.
pub const fn error_label(err: &DataError) -> &'static str {
    match err {
        DataError::Remote(_) => "remote",
        DataError::Local(_) => "local",
        DataError::Business(_) => "business",
    }
}

/// Install the global fmt subscriber.
///
/// `RUST_LOG` takes precedence over `default_directive`. Returns `false`
/// when a subscriber was already installed, which leaves it untouched.
pub fn init_tracing(default_directive: &str) -> bool {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).try_init().is_ok()
}

#[cfg(test)]
mod tests {
    use coinfolio_domain::{BusinessError, LocalError, RemoteError};

    use super::*;

    #[test]
    fn labels_follow_the_family() {
        assert_eq!(error_label(&RemoteError::Forbidden.into()), "remote");
        assert_eq!(error_label(&LocalError::DiskFull.into()), "local");
        assert_eq!(
            error_label(&BusinessError::KycRequired { message: None }.into()),
            "business"
        );
    }

    #[test]
    fn init_is_idempotent() {
        init_tracing("debug");
        assert!(!init_tracing("info"), "second install must be refused");
    }

    #[test]
    fn logging_every_severity_does_not_panic() {
        init_tracing("trace");
        let errors: [DataError; 4] = [
            RemoteError::NoInternet.into(),
            BusinessError::FeatureDisabled { feature_name: None, message: None }.into(),
            RemoteError::TooManyRequests.into(),
            LocalError::Unknown.into(),
        ];
        for err in &errors {
            log_data_error("tests", err);
        }
    }
}
