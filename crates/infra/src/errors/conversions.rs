//! Conversions from external infrastructure errors into transport errors.

use std::error::Error as StdError;

use coinfolio_core::{TimeoutKind, TransportError};
use reqwest::Error as HttpError;

use super::InfraError;

const DNS_MARKERS: [&str; 3] = ["dns", "resolve", "lookup"];

/* -------------------------------------------------------------------------- */
/* reqwest::Error → TransportError */
/* -------------------------------------------------------------------------- */

/// Translate a reqwest failure for the transport classifier.
///
/// The message carries the whole source chain: reqwest's own display is
/// generic ("error sending request"), the OS or TLS cause sits further down.
/// The request URL is left out so the endpoint never influences the
/// classification.
pub fn transport_error_from_reqwest(error: &HttpError) -> TransportError {
    let detail = source_chain(error);

    if error.is_timeout() {
        let kind = if is_connect(error) { TimeoutKind::Connect } else { TimeoutKind::Request };
        return TransportError::timeout(kind, detail);
    }

    if is_connect(error) {
        let lower = detail.to_ascii_lowercase();
        if DNS_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return TransportError::unresolved(detail);
        }
        return TransportError::io(detail);
    }

    if error.is_request() || error.is_body() || error.is_decode() {
        return TransportError::io(detail);
    }

    TransportError::other(detail)
}

#[cfg(not(target_arch = "wasm32"))]
fn is_connect(error: &HttpError) -> bool {
    error.is_connect()
}

#[cfg(target_arch = "wasm32")]
fn is_connect(_error: &HttpError) -> bool {
    false
}

fn source_chain(error: &HttpError) -> String {
    let mut detail = without_url(error);
    let mut source = error.source();
    while let Some(cause) = source {
        detail.push_str(": ");
        detail.push_str(&cause.to_string());
        source = cause.source();
    }
    detail
}

fn without_url(error: &HttpError) -> String {
    let text = error.to_string();
    match error.url() {
        Some(url) => text.replace(&format!(" for url ({url})"), "").replace(url.as_str(), ""),
        None => text,
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError::Client(source_chain(&value))
    }
}
