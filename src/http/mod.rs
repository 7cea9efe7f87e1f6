//! HTTP client used by the URL download helpers.
//!
//! Requests go through `reqwest-middleware` with exponential-backoff retries
//! and `reqwest-tracing` spans, so failures and timings show up in the
//! caller's `tracing` subscriber.
//!
//! # Examples
//!
//! ```rust
//! use mlutilz::http::{create_http_client, HttpClientConfig};
//! use reqwest::header::{HeaderMap, USER_AGENT};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut headers = HeaderMap::new();
//! headers.insert(USER_AGENT, "mlutilz/0.3".parse()?);
//!
//! let config = HttpClientConfig {
//!     retries: 5,
//!     headers: Some(headers),
//!     ..HttpClientConfig::default()
//! };
//!
//! let client = create_http_client(config)?;
//! # Ok(())
//! # }
//! ```

pub mod client;

pub use client::{create_http_client, HttpClientConfig};
