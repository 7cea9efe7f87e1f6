//! HTTP client setup and middleware configuration.

use reqwest::{header::HeaderMap, Proxy};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use reqwest_tracing::TracingMiddleware;

/// Configuration for HTTP client setup.
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Number of retries for failed requests.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<Proxy>,
    /// Default headers to include with all requests.
    pub headers: Option<HeaderMap>,
    /// Skip TLS certificate verification.
    ///
    /// Only meant for mirrors with broken certificate chains.
    pub accept_invalid_certs: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retries: 3,
            proxy: None,
            headers: None,
            accept_invalid_certs: false,
        }
    }
}

/// Build the client used for every download.
///
/// Requests go through tracing middleware and are retried with exponential
/// backoff on transient failures. Certificate checks stay on unless
/// `accept_invalid_certs` is set.
///
/// ```rust
/// use mlutilz::http::client::{create_http_client, HttpClientConfig};
///
/// let client = create_http_client(HttpClientConfig::default()).unwrap();
/// ```
pub fn create_http_client(
    config: HttpClientConfig,
) -> Result<ClientWithMiddleware, reqwest::Error> {
    let mut builder =
        reqwest::Client::builder().danger_accept_invalid_certs(config.accept_invalid_certs);
    if let Some(proxy) = config.proxy {
        builder = builder.proxy(proxy);
    }
    if let Some(headers) = config.headers {
        builder = builder.default_headers(headers);
    }

    let backoff = ExponentialBackoff::builder().build_with_max_retries(config.retries);
    Ok(ClientBuilder::new(builder.build()?)
        .with(TracingMiddleware::default())
        .with(RetryTransientMiddleware::new_with_policy(backoff))
        .build())
}
