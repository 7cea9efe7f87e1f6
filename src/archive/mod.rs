//! Archive extraction helpers.
//!
//! Thin wrappers over the `tar`, `zip`, `flate2` and `bzip2` decoders. Decoding
//! runs on the blocking thread pool so the helpers can be awaited from async
//! code like the rest of the crate.
//!
//! # Overview
//!
//! - [`tar`] - `.tar`, `.tar.gz` and `.tar.bz2` archives
//! - [`zip`] - `.zip` archives, with either side possibly in an object store
//! - [`compressed`] - single-file `.gz` and `.bz2` streams
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlutilz::archive::{extract_gz, extract_tar, extract_zip};
//!
//! # async fn example() -> Result<(), mlutilz::Error> {
//! extract_tar("data/cora.tgz", "data/raw", "r:gz").await?;
//! extract_zip("gs://bucket/glove.zip", "data/glove").await?;
//! let csv = extract_gz("data/edges.csv.gz", "data/raw").await?;
//! # Ok(())
//! # }
//! ```

pub mod compressed;
pub mod tar;
pub mod zip;

pub use self::compressed::{extract_bz2, extract_gz};
pub use self::tar::{extract_tar, TarCompression, DEFAULT_TAR_MODE};
pub use self::zip::{extract_zip, extract_zip_with};

use crate::error::Result;

/// Run blocking decoder work off the async runtime.
pub(crate) async fn blocking<T, F>(f: F) -> Result<T>
where
    F: FnOnce() -> Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}
