//! Builder for [`UrlDownloader`] instances.
//!
//! # Examples
//!
//! ```rust
//! use mlutilz::downloader::UrlDownloaderBuilder;
//! use mlutilz::fs::StorageConfig;
//! use reqwest::header::{self, HeaderValue};
//!
//! let downloader = UrlDownloaderBuilder::hidden()
//!     .retries(5)
//!     .header(header::USER_AGENT, HeaderValue::from_static("mlutilz"))
//!     .storage(StorageConfig::default().s3_region("eu-west-1"))
//!     .build();
//! assert_eq!(downloader.retries(), 5);
//! ```

use super::config::DownloaderConfig;
use super::downloader::UrlDownloader;
use crate::download::Summary;
use crate::fs::{FileSystem, StorageConfig};
use crate::progress::ProgressBarOpts;

use reqwest::header::{HeaderMap, HeaderValue, IntoHeaderName};
use std::sync::Arc;

/// A builder used to create a [`UrlDownloader`].
#[derive(Default)]
pub struct UrlDownloaderBuilder {
    config: DownloaderConfig,
}

impl UrlDownloaderBuilder {
    /// Creates a builder with the default options.
    pub fn new() -> Self {
        UrlDownloaderBuilder::default()
    }

    /// Convenience function to hide the progress bar.
    pub fn hidden() -> Self {
        UrlDownloaderBuilder::default().progress(ProgressBarOpts::hidden())
    }

    /// Set the number of retries per request.
    pub fn retries(mut self, retries: u32) -> Self {
        self.config.retries = retries;
        self
    }

    /// Route requests through `proxy`.
    pub fn proxy(mut self, proxy: reqwest::Proxy) -> Self {
        self.config.proxy = Some(proxy);
        self
    }

    /// Skip TLS certificate verification.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Set whether to download again when the target already exists.
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.config.overwrite = overwrite;
        self
    }

    /// Set the progress bar options.
    pub fn progress(mut self, progress: ProgressBarOpts) -> Self {
        self.config.progress = progress;
        self
    }

    /// Use a filesystem built from `config` for remote targets.
    pub fn storage(mut self, config: StorageConfig) -> Self {
        self.config.fs = FileSystem::new(config);
        self
    }

    /// Use `fs` for existence checks and uploads.
    pub fn filesystem(mut self, fs: FileSystem) -> Self {
        self.config.fs = fs;
        self
    }

    /// Set callback for when each download completes or is skipped.
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: Fn(&Summary) + Send + Sync + 'static,
    {
        self.config.on_complete = Some(Arc::new(Box::new(callback)));
        self
    }

    fn new_header(&self) -> HeaderMap {
        match self.config.headers {
            Some(ref h) => h.to_owned(),
            _ => HeaderMap::new(),
        }
    }

    /// Add the http headers.
    ///
    /// Calling `.headers()` several times merges every map into one.
    pub fn headers(mut self, headers: HeaderMap) -> Self {
        let mut new = self.new_header();
        new.extend(headers);

        self.config.headers = Some(new);
        self
    }

    /// Add the http header
    pub fn header<K: IntoHeaderName>(mut self, name: K, value: HeaderValue) -> Self {
        let mut new = self.new_header();

        new.insert(name, value);

        self.config.headers = Some(new);
        self
    }

    /// Create the [`UrlDownloader`] with the specified options.
    pub fn build(self) -> UrlDownloader {
        UrlDownloader::new(self.config)
    }
}
