//! reqwest-backed implementation of the transport port

use std::time::Duration;

use async_trait::async_trait;
use coinfolio_core::{HttpResponse, TransportError};
use coinfolio_domain::NetworkConfig;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::errors::{transport_error_from_reqwest, InfraError};

/// HTTP client implementing the transport port on top of reqwest.
///
/// A single attempt per [`HttpClient::send`]: retries are decided by callers
/// on classified errors, not by the transport.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    cancellation: Option<CancellationToken>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, InfraError> {
        Self::builder().build()
    }

    /// Build a client with the timeouts and user agent of `config`.
    pub fn from_config(config: &NetworkConfig) -> Result<Self, InfraError> {
        Self::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Token installed with [`HttpClientBuilder::cancellation`], if any.
    pub fn cancellation(&self) -> Option<&CancellationToken> {
        self.cancellation.as_ref()
    }

    /// Execute the provided request builder once.
    pub async fn send(&self, builder: RequestBuilder) -> Result<ReqwestResponse, TransportError> {
        let request = builder.build().map_err(|err| transport_error_from_reqwest(&err))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending HTTP request");

        let execution = self.client.execute(request);
        let outcome = match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!(%method, %url, "HTTP request cancelled");
                    return Err(TransportError::Cancelled);
                }
                outcome = execution => outcome,
            },
            None => execution.await,
        };

        match outcome {
            Ok(response) => {
                debug!(%method, %url, status = %response.status(), "received HTTP response");
                Ok(ReqwestResponse { response, cancellation: self.cancellation.clone() })
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(transport_error_from_reqwest(&err))
            }
        }
    }
}

/// A received response whose body has not been read yet.
///
/// Reading the body still honours the token of the client that sent the
/// request.
#[derive(Debug)]
pub struct ReqwestResponse {
    response: Response,
    cancellation: Option<CancellationToken>,
}

impl ReqwestResponse {
    pub fn into_inner(self) -> Response {
        self.response
    }
}

#[async_trait]
impl HttpResponse for ReqwestResponse {
    fn status(&self) -> u16 {
        self.response.status().as_u16()
    }

    async fn text(self) -> Result<String, TransportError> {
        let read = self.response.text();
        let outcome = match &self.cancellation {
            Some(token) => tokio::select! {
                biased;
                () = token.cancelled() => {
                    debug!("HTTP body read cancelled");
                    return Err(TransportError::Cancelled);
                }
                outcome = read => outcome,
            },
            None => read.await,
        };
        outcome.map_err(|err| transport_error_from_reqwest(&err))
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
    connect_timeout: Duration,
    user_agent: Option<String>,
    default_headers: Option<reqwest::header::HeaderMap>,
    cancellation: Option<CancellationToken>,
    accept_invalid_certs: bool,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(coinfolio_domain::DEFAULT_TIMEOUT_SECS),
            connect_timeout: Duration::from_secs(coinfolio_domain::DEFAULT_CONNECT_TIMEOUT_SECS),
            user_agent: None,
            default_headers: None,
            cancellation: None,
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientBuilder {
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    /// Abort in-flight requests when `token` fires.
    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Test-only helper to allow insecure TLS (e.g., self-signed certs).
    #[cfg(test)]
    pub fn accept_invalid_certs(mut self, enabled: bool) -> Self {
        self.accept_invalid_certs = enabled;
        self
    }

    pub fn build(self) -> Result<HttpClient, InfraError> {
        let mut builder = ReqwestClient::builder()
            .timeout(self.timeout)
            .connect_timeout(self.connect_timeout)
            .no_proxy();

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        if self.accept_invalid_certs {
            builder = builder.danger_accept_invalid_certs(true);
        }

        let client = builder.build()?;

        Ok(HttpClient { client, cancellation: self.cancellation })
    }
}
