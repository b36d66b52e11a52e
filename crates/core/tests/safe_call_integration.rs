//! End-to-end checks of the safe-call pipeline through the public API.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use coinfolio_common::error::{ErrorClassification, ErrorSeverity};
use coinfolio_common::resilience::RetryOnError;
use coinfolio_core::{CallResult, Cancelled, HttpResponse, SafeCaller, TransportError};
use coinfolio_domain::{BusinessError, DataError, RemoteError};
use serde::Deserialize;

struct Canned {
    status: u16,
    body: String,
}

#[async_trait]
impl HttpResponse for Canned {
    fn status(&self) -> u16 {
        self.status
    }

    async fn text(self) -> Result<String, TransportError> {
        Ok(self.body)
    }
}

/// Hands out scripted responses in order, one per request.
struct Script(Mutex<VecDeque<Result<Canned, TransportError>>>);

impl Script {
    fn new(steps: Vec<Result<(u16, &str), TransportError>>) -> Self {
        let steps = steps
            .into_iter()
            .map(|step| step.map(|(status, body)| Canned { status, body: body.to_string() }))
            .collect();
        Self(Mutex::new(steps))
    }

    async fn next(&self) -> Result<Canned, TransportError> {
        self.0
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::other("script exhausted")))
    }

    fn remaining(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

#[derive(Debug, PartialEq, Deserialize)]
struct Portfolio {
    holdings: Vec<String>,
}

#[tokio::test]
async fn business_failure_on_a_200_carries_server_message() {
    let script = Script::new(vec![Ok((
        200,
        r#"{"success":false,"errorCode":"daily_limit_exceeded","message":"Try again tomorrow"}"#,
    ))]);

    let outcome: CallResult<Portfolio> =
        SafeCaller::new().call(|| script.next()).await.expect("not cancelled");

    let error = outcome.unwrap_err();
    assert_eq!(
        error,
        DataError::Business(BusinessError::DailyLimitReached {
            limit: None,
            message: Some("Try again tomorrow".into())
        })
    );
    assert_eq!(error.to_string(), "Try again tomorrow");
    assert_eq!(error.code(), "DAILY_LIMIT_REACHED");
    assert!(!error.is_retryable());
}

#[tokio::test]
async fn unknown_business_code_is_preserved() {
    let script = Script::new(vec![Ok((200, r#"{"success":false,"errorCode":"SOME_NEW_CODE"}"#))]);

    let outcome: CallResult<Portfolio> =
        SafeCaller::new().call(|| script.next()).await.expect("not cancelled");

    assert_eq!(
        outcome,
        Err(DataError::Business(BusinessError::Unknown { code: "SOME_NEW_CODE".into(), message: None }))
    );
}

#[tokio::test(start_paused = true)]
async fn refused_connection_is_not_retried() {
    let script = Script::new(vec![
        Err(TransportError::io("Connection reset by peer")),
        Ok((503, "")),
        Ok((200, r#"{"holdings":["btc","eth"]}"#)),
    ]);
    let caller = SafeCaller::new();

    let outcome: Result<CallResult<Portfolio>, Cancelled> = caller
        .retry(RetryOnError::new(3, Duration::from_millis(250)), || caller.call(|| script.next()))
        .await;

    assert_eq!(outcome, Ok(Err(RemoteError::ConnectionRefused.into())));
    assert_eq!(script.remaining(), 2);
}

#[tokio::test(start_paused = true)]
async fn timeouts_and_outages_are_retried_until_success() {
    let script = Script::new(vec![
        Ok((408, "")),
        Ok((502, "<html>bad gateway</html>")),
        Ok((200, r#"{"holdings":["sol"]}"#)),
    ]);
    let caller = SafeCaller::new();

    let outcome: Result<CallResult<Portfolio>, Cancelled> = caller
        .retry(RetryOnError::new(3, Duration::from_millis(250)), || caller.call(|| script.next()))
        .await;

    assert_eq!(outcome, Ok(Ok(Portfolio { holdings: vec!["sol".into()] })));
    assert_eq!(script.remaining(), 0);
}

#[tokio::test]
async fn failures_carry_severity_for_logging() {
    let script = Script::new(vec![Ok((429, "")), Ok((500, "")), Ok((200, "not json"))]);
    let caller = SafeCaller::new();

    let mut errors = Vec::new();
    for _ in 0..3 {
        let outcome: CallResult<Portfolio> = caller.call(|| script.next()).await.expect("not cancelled");
        errors.push(outcome.unwrap_err());
    }
    let seen: Vec<_> = errors.iter().map(|error| (error.code(), error.severity(), error.retry_after())).collect();

    assert_eq!(
        seen,
        vec![
            ("TOO_MANY_REQUESTS", ErrorSeverity::Warning, Some(Duration::from_secs(60))),
            ("SERVER_ERROR", ErrorSeverity::Error, None),
            ("SERIALIZATION", ErrorSeverity::Error, None),
        ]
    );
}
