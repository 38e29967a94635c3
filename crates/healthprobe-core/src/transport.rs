//! Shared HTTP transport
//!
//! One client is built per run from [`HttpClientConfig`] and handed to both
//! the prober and the notifier. The [`Transport`] trait is the seam tests use
//! to script responses without a network.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONNECTION};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::HttpClientConfig;
use crate::error::{Error, Result};

/// Response to a POST, with the body already read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Outbound HTTP used by a health check run
#[async_trait]
pub trait Transport: Send + Sync {
    /// GET `url` and return the response status.
    ///
    /// The response is released before this returns, on every path.
    async fn get(&self, url: &Url) -> Result<StatusCode>;

    /// POST `body` as `application/json` to `url`
    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<TransportResponse>;
}

/// [`Transport`] backed by a `reqwest` client
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    header_timeout: Duration,
}

impl HttpTransport {
    /// Build the client. Failure here is a fatal configuration error.
    pub fn new(config: &HttpClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        if !config.keep_alive {
            headers.insert(CONNECTION, HeaderValue::from_static("close"));
        }

        let max_idle = if config.keep_alive {
            config.max_idle_per_host
        } else {
            0
        };

        let redirect = if config.follow_redirects {
            Policy::default()
        } else {
            Policy::none()
        };

        let mut builder = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(max_idle)
            .default_headers(headers)
            .redirect(redirect)
            .no_gzip()
            .no_brotli()
            .no_deflate();

        // reqwest reads HTTP(S)_PROXY / NO_PROXY from the environment by default
        if !config.use_env_proxy {
            builder = builder.no_proxy();
        }

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {e}")))?;

        debug!(
            request_timeout = ?config.request_timeout,
            connect_timeout = ?config.connect_timeout,
            header_timeout = ?config.response_header_timeout,
            keep_alive = config.keep_alive,
            "HTTP client ready"
        );

        Ok(Self {
            client,
            header_timeout: header_deadline(config),
        })
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response> {
        match tokio::time::timeout(self.header_timeout, request.send()).await {
            Ok(result) => Ok(result?),
            Err(_) => Err(Error::Timeout(self.header_timeout)),
        }
    }
}

/// Deadline for `send()` to yield response headers: connection setup plus the
/// header wait, never beyond the overall request timeout.
fn header_deadline(config: &HttpClientConfig) -> Duration {
    (config.connect_timeout + config.response_header_timeout).min(config.request_timeout)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &Url) -> Result<StatusCode> {
        let response = self.send(self.client.get(url.clone())).await?;
        let status = response.status();
        drop(response);
        Ok(status)
    }

    async fn post_json(&self, url: &Url, body: &serde_json::Value) -> Result<TransportResponse> {
        let response = self.send(self.client.post(url.clone()).json(body)).await?;
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Ok(TransportResponse { status, body })
    }
}
