//! HTTP transport adapter

mod client;

pub use client::{HttpClient, HttpClientBuilder, ReqwestResponse};
