//! # Coinfolio Infrastructure
//!
//! Adapters that plug real I/O into the safe-call pipeline of
//! `coinfolio-core`.
//!
//! This crate contains:
//! - A reqwest-backed HTTP client implementing the transport port
//! - [`ApiClient`], which routes every request through a safe call
//! - The network configuration loader (environment, JSON, TOML)
//! - Tracing helpers for logging classified errors
//!
//! ## Architecture
//! - Implements traits defined in `coinfolio-core`
//! - Depends on `coinfolio-common`, `coinfolio-domain` and `coinfolio-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod api;
pub mod config;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use api::{ApiClient, ApiClientBuilder};
pub use errors::{transport_error_from_reqwest, InfraError};
pub use http::{HttpClient, HttpClientBuilder, ReqwestResponse};
pub use observability::logging::{error_label, init_tracing, log_data_error};
