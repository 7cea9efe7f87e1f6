//! Download descriptions and results.
//!
//! - [`download`] - The [`Download`] struct and file name extraction
//! - [`summary`] - [`Summary`] and [`Status`] of a finished download
//!
//! The fetching itself lives in [`crate::downloader`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlutilz::download::{Download, Status};
//! use mlutilz::downloader::UrlDownloaderBuilder;
//! use std::convert::TryFrom;
//!
//! # async fn example() -> Result<(), mlutilz::Error> {
//! let download = Download::try_from("https://example.com/cora.tgz")?;
//! let summary = UrlDownloaderBuilder::new()
//!     .build()
//!     .download(&download, "data/raw")
//!     .await?;
//!
//! if let Status::Skipped(reason) = summary.status() {
//!     println!("{}: {}", summary.location(), reason);
//! }
//! # Ok(())
//! # }
//! ```

pub mod download;
pub mod summary;

pub use download::{filename_from_url, Download};
pub use summary::{Status, Summary};
