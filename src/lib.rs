//! mlutilz gathers the path, archive and download helpers that machine
//! learning codebases keep rewriting.
//!
//! Every path-taking helper accepts local paths as well as `gs://`, `gcs://`
//! and `s3://` URIs and dispatches to the local disk or to an object store.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mlutilz::archive::extract_tar;
//! use mlutilz::downloader::download_url;
//! use mlutilz::fs::{ls, ListOptions};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), mlutilz::Error> {
//! let archive = download_url("https://example.com/cora.tgz", "data/raw").await?;
//! extract_tar(archive.into_local()?, "data/cora", "r:gz").await?;
//!
//! let shards = ls("gs://bucket/cora/processed", &ListOptions::default()).await?;
//! println!("{} parquet shards", shards.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Module Organization
//!
//! - [`fs`] - Location parsing, listing, opening and transferring files
//! - [`archive`] - tar, zip, bz2 and gz extraction
//! - [`download`] - The `Download` description and its `Summary`
//! - [`downloader`] - `UrlDownloader` and the `download_url` shortcut
//! - [`error`] - Centralized error handling with the `Error` enum
//! - [`http`] - HTTP client with retry and tracing middleware
//! - [`progress`] - Progress bar styling
//! - [`utils`] - Flattening, naming, seeding and type registry helpers

pub mod archive;
pub mod download;
pub mod downloader;
pub mod error;
pub mod fs;
pub mod http;
pub mod progress;
pub mod utils;

pub use archive::{extract_bz2, extract_gz, extract_tar, extract_zip};
pub use download::{Download, Status, Summary};
pub use downloader::{download_url, UrlDownloader, UrlDownloaderBuilder};
pub use error::{Error, Result};
pub use fs::{FileSystem, IntoLocation, Location, RemoteUri, StorageConfig};
pub use http::{create_http_client, HttpClientConfig};
pub use progress::ProgressBarOpts;
pub use utils::{flatten_list, set_seed, snake_case_id};
