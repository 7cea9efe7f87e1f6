//! URL downloads into local folders or object store prefixes.
//!
//! - `downloader` - [`UrlDownloader`] and the [`download_url`] shortcut
//! - `builder` - [`UrlDownloaderBuilder`]
//! - `config` - [`DownloaderConfig`] and the completion callback type
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlutilz::downloader::download_url;
//!
//! # async fn example() -> Result<(), mlutilz::Error> {
//! // Cached locally: a second call reuses the file.
//! let local = download_url("https://example.com/cora.tgz", "data/raw").await?;
//!
//! // Staged in a temporary directory, then uploaded.
//! let remote = download_url("https://example.com/cora.tgz", "gs://bucket/raw").await?;
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod downloader;

pub use builder::UrlDownloaderBuilder;
pub use config::{DownloadCallback, DownloaderConfig};
pub use downloader::{download_url, UrlDownloader};
