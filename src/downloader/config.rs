//! Configuration for the [`UrlDownloader`](super::UrlDownloader).

use crate::download::Summary;
use crate::fs::FileSystem;
use crate::http::HttpClientConfig;
use crate::progress::ProgressBarOpts;

use reqwest::header::HeaderMap;
use std::sync::Arc;

/// Callback type for download completion events
pub type DownloadCallback = Box<dyn Fn(&Summary) + Send + Sync>;

/// Configuration structure for the downloader
#[derive(Clone)]
pub struct DownloaderConfig {
    /// Number of retries per request.
    pub retries: u32,
    /// Optional proxy configuration.
    pub proxy: Option<reqwest::Proxy>,
    /// Custom HTTP headers.
    pub headers: Option<HeaderMap>,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    /// Download again even if the target already exists.
    pub overwrite: bool,
    /// Progress bar shown while fetching.
    pub progress: ProgressBarOpts,
    /// Filesystem used for existence checks and uploads.
    pub fs: FileSystem,
    /// Callback for when each download completes.
    pub on_complete: Option<Arc<DownloadCallback>>,
}

impl DownloaderConfig {
    /// HTTP client settings derived from this configuration.
    pub fn http_client_config(&self) -> HttpClientConfig {
        HttpClientConfig {
            retries: self.retries,
            proxy: self.proxy.clone(),
            headers: self.headers.clone(),
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}

impl std::fmt::Debug for DownloaderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloaderConfig")
            .field("retries", &self.retries)
            .field("proxy", &self.proxy)
            .field("headers", &self.headers)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("overwrite", &self.overwrite)
            .field("progress", &self.progress)
            .field("fs", &self.fs)
            .field("on_complete", &self.on_complete.is_some())
            .finish()
    }
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        let http = HttpClientConfig::default();
        Self {
            retries: http.retries,
            proxy: http.proxy,
            headers: http.headers,
            accept_invalid_certs: http.accept_invalid_certs,
            overwrite: false,
            progress: ProgressBarOpts::default(),
            fs: FileSystem::default(),
            on_complete: None,
        }
    }
}
