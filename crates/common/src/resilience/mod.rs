//! Resilience patterns for transient failures
//!
//! - **Retry on error**: re-invoke an async operation while it fails with a
//!   retryable error, waiting a linearly growing delay between attempts.
//!
//! The helpers are generic over the error type. Each call owns its attempt
//! counter, so concurrent callers never share retry state.

pub mod retry;

pub use retry::{retry_on_error, retry_retryable, RetryOnError};
