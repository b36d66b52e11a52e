//! Remote API access through the safe-call pipeline

mod client;

pub use client::{ApiClient, ApiClientBuilder};
