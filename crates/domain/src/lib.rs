//! # Coinfolio Domain
//!
//! Domain types for the Coinfolio data layer.
//!
//! This crate contains:
//! - The error taxonomy (remote, local, business) and the unified
//!   [`DataError`]
//! - Wire shapes shared by error parsers ([`BusinessErrorInfo`],
//!   [`ApiEnvelope`])
//! - Network configuration structures
//!
//! ## Architecture
//! - Depends only on the foundation tier of `coinfolio-common`
//! - No HTTP, runtime, or platform code

pub mod config;
pub mod envelope;
pub mod errors;
pub mod macros;

// Re-export commonly used items
pub use config::*;
pub use envelope::*;
pub use errors::*;
