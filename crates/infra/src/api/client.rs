//! API client routing every request through a safe call
//!
//! Each method returns `Result<CallResult<T>, Cancelled>`: transport, status,
//! business and decoding failures all land in the inner
//! [`DataError`](coinfolio_domain::DataError).

use std::sync::Arc;
use std::time::Duration;

use coinfolio_common::resilience::RetryOnError;
use coinfolio_core::{ApiErrorParser, CallResult, Cancelled, DefaultApiErrorParser, SafeCaller};
use coinfolio_domain::NetworkConfig;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::config::validate;
use crate::errors::InfraError;
use crate::http::HttpClient;

/// API client for the configured base URL
#[derive(Clone)]
pub struct ApiClient {
    http_client: HttpClient,
    base_url: String,
    caller: SafeCaller<Arc<dyn ApiErrorParser>>,
    retry: RetryOnError,
}

impl ApiClient {
    /// Create a new API client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HttpClient cannot be
    /// created
    pub fn new(config: &NetworkConfig) -> Result<Self, InfraError> {
        Self::builder().config(config.clone()).build()
    }

    /// Create a builder for fluent configuration
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /// Replace the business error parser used for every call
    #[must_use]
    pub fn with_parser(mut self, parser: Arc<dyn ApiErrorParser>) -> Self {
        self.caller = self.caller.with_parser(parser);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute a GET request
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the client's cancellation token fired
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<CallResult<T>, Cancelled> {
        let url = self.url(path);
        debug!(url = %url, "GET request");

        let request = self.http_client.request(Method::GET, url);
        self.caller.call(|| self.http_client.send(request)).await
    }

    /// Execute a POST request with a JSON body
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the client's cancellation token fired
    #[instrument(skip(self, body), fields(path = %path))]
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<CallResult<T>, Cancelled>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        debug!(url = %url, "POST request");

        let request = self.http_client.request(Method::POST, url).json(body);
        self.caller.call(|| self.http_client.send(request)).await
    }

    /// Execute a GET request against an endpoint that wraps its payload in
    /// `{success, data, errorCode, message}`
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the client's cancellation token fired
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_enveloped<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<CallResult<T>, Cancelled> {
        let url = self.url(path);
        debug!(url = %url, "GET request (enveloped)");

        let request = self.http_client.request(Method::GET, url);
        self.caller.call_enveloped(|| self.http_client.send(request)).await
    }

    /// [`ApiClient::get`], retried on retryable errors with the configured
    /// linear backoff
    ///
    /// # Errors
    ///
    /// Returns [`Cancelled`] if the client's cancellation token fired
    #[instrument(skip(self), fields(path = %path))]
    pub async fn get_with_retry<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<CallResult<T>, Cancelled> {
        self.caller.retry(self.retry, || self.get(path)).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Builder for API client
#[derive(Default)]
pub struct ApiClientBuilder {
    config: Option<NetworkConfig>,
    http_client: Option<HttpClient>,
    parser: Option<Arc<dyn ApiErrorParser>>,
    cancellation: Option<CancellationToken>,
}

impl ApiClientBuilder {
    /// Set the network configuration
    pub fn config(mut self, config: NetworkConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Use a preconfigured HTTP client instead of one built from the config
    ///
    /// Without an explicit [`ApiClientBuilder::cancellation`], calls adopt
    /// the client's own token.
    pub fn http_client(mut self, client: HttpClient) -> Self {
        self.http_client = Some(client);
        self
    }

    pub fn parser(mut self, parser: Arc<dyn ApiErrorParser>) -> Self {
        self.parser = Some(parser);
        self
    }

    /// Abort calls when `token` fires
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Build the API client
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is not an http(s) URL or client creation
    /// fails
    pub fn build(self) -> Result<ApiClient, InfraError> {
        let config = self.config.unwrap_or_default();
        validate(&config)?;

        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = HttpClient::builder()
                    .timeout(Duration::from_secs(config.timeout_secs))
                    .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
                    .user_agent(config.user_agent.clone());
                if let Some(token) = &self.cancellation {
                    builder = builder.cancellation(token.clone());
                }
                builder.build()?
            }
        };

        let parser = self.parser.unwrap_or_else(|| Arc::new(DefaultApiErrorParser));
        let mut caller = SafeCaller::new().with_parser(parser);
        let cancellation = self.cancellation.or_else(|| http_client.cancellation().cloned());
        if let Some(token) = cancellation {
            caller = caller.with_cancellation(token);
        }

        Ok(ApiClient {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            caller,
            retry: RetryOnError::new(
                config.retry.max_attempts,
                Duration::from_millis(config.retry.initial_delay_ms),
            ),
        })
    }
}
