//! Integration tests for `coinfolio_common::resilience`.
//!
//! These suites exercise the retry helpers together with
//! `ErrorClassification` and the result combinators, the way data-layer
//! callers compose them.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use coinfolio_common::{
    retry_on_error, retry_retryable, ErrorClassification, ErrorSeverity, ResultExt, RetryOnError,
};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
enum QuoteError {
    #[error("offline")]
    Offline,
    #[error("unauthorized")]
    Unauthorized,
}

impl ErrorClassification for QuoteError {
    fn is_retryable(&self) -> bool {
        matches!(self, Self::Offline)
    }

    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Offline => ErrorSeverity::Debug,
            Self::Unauthorized => ErrorSeverity::Warning,
        }
    }
}

fn scripted(outcomes: Vec<Result<u32, QuoteError>>) -> (Arc<AtomicU32>, Arc<Mutex<Vec<Result<u32, QuoteError>>>>) {
    (Arc::new(AtomicU32::new(0)), Arc::new(Mutex::new(outcomes.into_iter().rev().collect())))
}

#[tokio::test(start_paused = true)]
async fn retryable_errors_are_retried_until_success() {
    let (calls, script) =
        scripted(vec![Err(QuoteError::Offline), Err(QuoteError::Offline), Ok(42)]);

    let result = retry_retryable(RetryOnError::new(3, Duration::from_millis(50)), || {
        let calls = calls.clone();
        let script = script.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            script.lock().unwrap().pop().unwrap_or(Err(QuoteError::Offline))
        }
    })
    .await;

    assert_eq!(result, Ok(42));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test(start_paused = true)]
async fn non_retryable_error_stops_immediately() {
    let (calls, script) = scripted(vec![Err(QuoteError::Unauthorized), Ok(1)]);

    let result = retry_retryable(RetryOnError::default(), || {
        let calls = calls.clone();
        let script = script.clone();
        async move {
            calls.fetch_add(1, Ordering::SeqCst);
            script.lock().unwrap().pop().unwrap_or(Ok(0))
        }
    })
    .await;

    assert_eq!(result, Err(QuoteError::Unauthorized));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn last_error_is_returned_after_exhaustion() {
    let observed = Mutex::new(Vec::new());

    let result: Result<u32, QuoteError> =
        retry_on_error(RetryOnError::new(2, Duration::from_millis(5)), |_| true, || async {
            Err(QuoteError::Offline)
        })
        .await
        .on_error(|e| observed.lock().unwrap().push(e.severity()));

    assert_eq!(result, Err(QuoteError::Offline));
    assert_eq!(*observed.lock().unwrap(), vec![ErrorSeverity::Debug]);
}

#[tokio::test(start_paused = true)]
async fn concurrent_callers_keep_independent_counters() {
    let config = RetryOnError::new(3, Duration::from_millis(10));
    let first = Arc::new(AtomicU32::new(0));
    let second = Arc::new(AtomicU32::new(0));

    let run = |counter: Arc<AtomicU32>, succeed_on: u32| async move {
        retry_retryable(config, || {
            let counter = counter.clone();
            async move {
                let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt >= succeed_on {
                    Ok(attempt)
                } else {
                    Err(QuoteError::Offline)
                }
            }
        })
        .await
    };

    let (a, b) = tokio::join!(run(first.clone(), 1), run(second.clone(), 3));

    assert_eq!(a, Ok(1));
    assert_eq!(b, Ok(3));
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 3);
}
