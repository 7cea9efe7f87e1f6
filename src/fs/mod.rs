//! Path abstraction over the local filesystem and remote object stores.
//!
//! Every helper takes a path-like value and routes the call by prefix:
//! `gs://`, `gcs://` and `s3://` strings go to the matching object store,
//! everything else (and every [`std::path::Path`]) to the local filesystem.
//!
//! # Overview
//!
//! - [`location`] - Classification, joining and parsing of paths
//! - [`store`] - Object store clients bound to a bucket
//! - [`ops`] - The [`FileSystem`] dispatcher (`ls`, `exists`, `open`, `mkdir`)
//! - [`transfer`] - Upload and download between local and remote storage
//! - [`handle`] - File handles returned by [`open_fileptr`]
//! - [`config`] - Storage overrides
//!
//! # Examples
//!
//! ```rust,no_run
//! use mlutilz::fs::{self, ListOptions, OpenMode};
//! use tokio::io::AsyncWriteExt;
//!
//! # async fn example() -> Result<(), mlutilz::Error> {
//! let out = fs::join("gs://bucket/run-1", ["metrics.json"])?;
//! let mut handle = fs::open_fileptr(&out, OpenMode::Write).await?;
//! handle.write_all(b"{}").await?;
//! fs::close_fileptr(handle).await?;
//!
//! let parquet = fs::ls("gs://bucket/dataset", &ListOptions::default()).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod handle;
pub mod location;
pub mod ops;
pub mod store;
pub mod transfer;

pub use config::StorageConfig;
pub use handle::{FileHandle, OpenMode};
pub use location::{
    is_gcs_path, is_local, join, local_path, IntoLocation, JoinParts, Location, RemoteUri, Scheme,
};
pub use ops::{FileSystem, ListOptions, MkdirOptions, MANIFEST_PREFIX};
pub use store::{get_fs, get_fs_with_config, Listing, RemoteStore};

use crate::error::Result;
use std::path::Path;

/// List the entries under `path`. See [`FileSystem::ls`].
pub async fn ls(path: impl IntoLocation, options: &ListOptions) -> Result<Vec<Location>> {
    FileSystem::default().ls(path, options).await
}

/// Whether `path` exists. See [`FileSystem::exists`].
pub async fn exists(path: impl IntoLocation) -> Result<bool> {
    FileSystem::default().exists(path).await
}

/// Open `path` for reading or writing. See [`FileSystem::open`].
pub async fn open_fileptr(path: impl IntoLocation, mode: OpenMode) -> Result<FileHandle> {
    FileSystem::default().open(path, mode).await
}

/// Flush and close a handle returned by [`open_fileptr`].
pub async fn close_fileptr(handle: FileHandle) -> Result<()> {
    Ok(handle.close().await?)
}

/// Create the directory `path`. See [`FileSystem::mkdir`].
pub async fn mkdir(path: impl IntoLocation, options: MkdirOptions) -> Result<()> {
    FileSystem::default().mkdir(path, options).await
}

/// Upload a local file or directory. See [`FileSystem::upload_to_uri`].
pub async fn upload_to_uri(local: impl AsRef<Path>, uri: impl IntoLocation) -> Result<()> {
    FileSystem::default().upload_to_uri(local, uri).await
}

/// Download an object or prefix. See [`FileSystem::download_from_uri`].
pub async fn download_from_uri(uri: impl IntoLocation, local: impl AsRef<Path>) -> Result<()> {
    FileSystem::default().download_from_uri(uri, local).await
}
