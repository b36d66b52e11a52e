//! Safe-call orchestrator
//!
//! A safe call runs one request through a fixed sequence, short-circuiting
//! on the first failure:
//!
//! 1. execute the request; transport failures are classified
//! 2. check the status; non-2xx codes are mapped
//! 3. buffer the body as text, once
//! 4. run the business error parser over the body
//! 5. decode the body into the caller's payload type
//!
//! The outcome is `Result<CallResult<T>, Cancelled>`. The outer layer only
//! ever carries cancellation, so callers propagate it with `?` and handle
//! the inner [`DataError`] like any other result.
//!
//! ```rust,ignore
//! let coins: CallResult<Vec<Coin>> = safe_call(|| client.send(request)).await?;
//! ```

use std::future::Future;

use coinfolio_common::error::ErrorClassification;
use coinfolio_common::resilience::{retry_on_error, RetryOnError};
use coinfolio_domain::{ApiEnvelope, DataError, RemoteError};
use serde::de::DeserializeOwned;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::business::{business_error_from_code, parse_business_error, ApiErrorParser, DefaultApiErrorParser};
use crate::status::{is_success, map_status_code_to_error};
use crate::transport::{classify_transport_error, Cancelled, HttpResponse, TransportError};

/// Outcome of a safe call that was not cancelled.
pub type CallResult<T> = Result<T, DataError>;

/// Code used when a wrapped envelope reports failure without an error code.
const UNSPECIFIED_ERROR_CODE: &str = "UNKNOWN";

/// Runs requests through the safe-call pipeline.
///
/// Holds no per-call state; one caller can serve any number of concurrent
/// calls.
#[derive(Debug, Clone, Default)]
pub struct SafeCaller<P = DefaultApiErrorParser> {
    parser: P,
    cancellation: Option<CancellationToken>,
}

impl SafeCaller<DefaultApiErrorParser> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: ApiErrorParser> SafeCaller<P> {
    /// Replace the business error parser.
    pub fn with_parser<Q: ApiErrorParser>(self, parser: Q) -> SafeCaller<Q> {
        SafeCaller { parser, cancellation: self.cancellation }
    }

    /// Abort in-flight calls when `token` fires.
    ///
    /// The execute and body-read steps race the token, and unclassifiable
    /// transport failures seen after it fired are reported as cancellation.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub const fn parser(&self) -> &P {
        &self.parser
    }

    /// Execute a request and decode its body as `T`.
    ///
    /// An empty 2xx body decodes as JSON `null`, so `()` and `Option<_>`
    /// payloads accept `204 No Content`.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the call was cancelled; every other failure is
    /// reported inside the [`CallResult`].
    pub async fn call<T, R, F, Fut>(&self, execute: F) -> Result<CallResult<T>, Cancelled>
    where
        T: DeserializeOwned,
        R: HttpResponse,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, TransportError>>,
    {
        let body = match self.fetch_body(execute).await? {
            Ok(body) => body,
            Err(error) => return Ok(Err(error.into())),
        };

        if let Some(error) = parse_business_error(&body, &self.parser) {
            return Ok(Err(error.into()));
        }

        Ok(decode_payload(&body).map_err(DataError::from))
    }

    /// Execute a request against an API that wraps every payload in
    /// `{success, data, errorCode, message}`.
    ///
    /// The free-form business error parser is not consulted: `success=false`
    /// resolves `errorCode` through the code registry directly.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the call was cancelled.
    pub async fn call_enveloped<T, R, F, Fut>(
        &self,
        execute: F,
    ) -> Result<CallResult<T>, Cancelled>
    where
        T: DeserializeOwned,
        R: HttpResponse,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, TransportError>>,
    {
        let body = match self.fetch_body(execute).await? {
            Ok(body) => body,
            Err(error) => return Ok(Err(error.into())),
        };

        Ok(unwrap_envelope(&body))
    }

    /// Re-run `block` while it fails with a retryable [`DataError`].
    ///
    /// Delays grow linearly (see [`RetryOnError`]). Cancellation, from
    /// `block` or from this caller's token during a backoff wait, stops the
    /// loop immediately.
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if any attempt or wait was cancelled.
    pub async fn retry<T, F, Fut>(
        &self,
        config: RetryOnError,
        mut block: F,
    ) -> Result<CallResult<T>, Cancelled>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<CallResult<T>, Cancelled>>,
    {
        let attempts = retry_on_error(config, Interruption::is_retryable, || {
            let attempt = block();
            async move {
                match attempt.await {
                    Ok(Ok(value)) => Ok(value),
                    Ok(Err(error)) => Err(Interruption::Failed(error)),
                    Err(Cancelled) => Err(Interruption::Cancelled),
                }
            }
        });

        let outcome = match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => return Err(Cancelled),
                outcome = attempts => outcome,
            },
            None => attempts.await,
        };

        match outcome {
            Ok(value) => Ok(Ok(value)),
            Err(Interruption::Failed(error)) => Ok(Err(error)),
            Err(Interruption::Cancelled) => Err(Cancelled),
        }
    }

    async fn fetch_body<R, F, Fut>(&self, execute: F) -> Result<Result<String, RemoteError>, Cancelled>
    where
        R: HttpResponse,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<R, TransportError>>,
    {
        let response = match self.guard(execute()).await {
            Ok(response) => response,
            Err(error) => return self.classify(&error).map(Err),
        };

        let status = response.status();
        if !is_success(status) {
            let error = map_status_code_to_error(status);
            debug!(status, remote = error.code(), "request failed with HTTP status");
            return Ok(Err(error));
        }

        match self.guard(response.text()).await {
            Ok(body) => Ok(Ok(body)),
            Err(error) => self.classify(&error).map(Err),
        }
    }

    async fn guard<O, Fut>(&self, step: Fut) -> Result<O, TransportError>
    where
        Fut: Future<Output = Result<O, TransportError>>,
    {
        match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => Err(TransportError::Cancelled),
                out = step => out,
            },
            None => step.await,
        }
    }

    fn classify(&self, error: &TransportError) -> Result<RemoteError, Cancelled> {
        classify_transport_error(error, self.cancellation.as_ref())
    }
}

enum Interruption {
    Failed(DataError),
    Cancelled,
}

impl Interruption {
    fn is_retryable(&self) -> bool {
        match self {
            Self::Failed(error) => error.is_retryable(),
            Self::Cancelled => false,
        }
    }
}

fn decode_payload<T: DeserializeOwned>(body: &str) -> Result<T, RemoteError> {
    let decoded = if body.trim().is_empty() {
        serde_json::from_value(serde_json::Value::Null)
    } else {
        serde_json::from_str(body)
    };

    decoded.map_err(|error| {
        debug!(error = %error, "response body does not match the expected payload");
        RemoteError::Serialization
    })
}

fn unwrap_envelope<T: DeserializeOwned>(body: &str) -> CallResult<T> {
    let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(body).map_err(|error| {
        debug!(error = %error, "response body is not an API envelope");
        RemoteError::Serialization
    })?;

    if envelope.success {
        let data = envelope.data.unwrap_or(serde_json::Value::Null);
        return serde_json::from_value(data).map_err(|error| {
            debug!(error = %error, "envelope data does not match the expected payload");
            DataError::from(RemoteError::Serialization)
        });
    }

    let code = envelope.error_code.unwrap_or_else(|| UNSPECIFIED_ERROR_CODE.to_string());
    Err(business_error_from_code(&code, envelope.message).into())
}

/// [`SafeCaller::call`] with the default parser and no cancellation token.
///
/// # Errors
///
/// Returns [`Cancelled`] if the transport reported cancellation.
pub async fn safe_call<T, R, F, Fut>(execute: F) -> Result<CallResult<T>, Cancelled>
where
    T: DeserializeOwned,
    R: HttpResponse,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, TransportError>>,
{
    SafeCaller::new().call(execute).await
}

/// [`SafeCaller::call`] with a caller-supplied parser.
///
/// # Errors
///
/// Returns [`Cancelled`] if the transport reported cancellation.
pub async fn safe_call_with<T, P, R, F, Fut>(
    parser: &P,
    execute: F,
) -> Result<CallResult<T>, Cancelled>
where
    T: DeserializeOwned,
    P: ApiErrorParser + ?Sized,
    R: HttpResponse,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, TransportError>>,
{
    SafeCaller::new().with_parser(parser).call(execute).await
}

/// [`SafeCaller::call_enveloped`] with no cancellation token.
///
/// # Errors
///
/// Returns [`Cancelled`] if the transport reported cancellation.
pub async fn safe_api_call<T, R, F, Fut>(execute: F) -> Result<CallResult<T>, Cancelled>
where
    T: DeserializeOwned,
    R: HttpResponse,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<R, TransportError>>,
{
    SafeCaller::new().call_enveloped(execute).await
}
