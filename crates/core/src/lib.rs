//! # Coinfolio Core
//!
//! Safe-call pipeline for remote APIs: no HTTP client, only ports and pure
//! classification logic.
//!
//! This crate contains:
//! - Transport ports ([`HttpResponse`], [`TransportError`]) and the transport
//!   exception classifier
//! - The HTTP status mapper
//! - The business error parser and its code registry
//! - The safe-call orchestrator ([`SafeCaller`], [`safe_call`],
//!   [`safe_api_call`])
//!
//! ## Architecture Principles
//! - Depends only on `coinfolio-common` and `coinfolio-domain`
//! - All external collaborators via traits
//! - Every failure is returned as a [`DataError`](coinfolio_domain::DataError);
//!   cancellation is the only signal that escapes, as [`Cancelled`]

pub mod business;
pub mod safe_call;
pub mod status;
pub mod transport;

// Re-export specific items to avoid ambiguity
pub use business::{
    business_error_from_code, parse_business_error, ApiErrorParser, DefaultApiErrorParser,
    FnErrorParser,
};
pub use safe_call::{safe_api_call, safe_call, safe_call_with, CallResult, SafeCaller};
pub use status::{is_success, map_status_code_to_error};
pub use transport::{classify_transport_error, Cancelled, HttpResponse, TimeoutKind, TransportError};
