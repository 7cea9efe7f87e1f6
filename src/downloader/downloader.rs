//! Fetch a URL into a local folder or an object store prefix.
//!
//! The body is streamed into a fresh temporary directory first and only then
//! copied (local target) or uploaded (remote target), so a failed transfer
//! never leaves a partial file at the destination.

use super::config::DownloaderConfig;
use crate::download::{Download, Status, Summary};
use crate::error::Result;
use crate::fs::{IntoLocation, Location};
use crate::http::create_http_client;

use futures::StreamExt;
use reqwest::header::HeaderMap;
use std::convert::TryFrom;
use std::fmt;
use std::path::Path;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info};

/// Represents the download controller.
///
/// ```rust
/// use mlutilz::downloader::UrlDownloaderBuilder;
///
/// let d = UrlDownloaderBuilder::new().build();
/// assert!(!d.overwrite());
/// ```
#[derive(Clone)]
pub struct UrlDownloader {
    config: DownloaderConfig,
}

impl fmt::Debug for UrlDownloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlDownloader")
            .field("config", &self.config)
            .finish()
    }
}

impl UrlDownloader {
    pub(crate) fn new(config: DownloaderConfig) -> Self {
        Self { config }
    }

    /// Gets the number of retries per request.
    pub fn retries(&self) -> u32 {
        self.config.retries
    }

    /// Gets the custom headers.
    pub fn headers(&self) -> Option<&HeaderMap> {
        self.config.headers.as_ref()
    }

    /// Gets whether existing targets are downloaded again.
    pub fn overwrite(&self) -> bool {
        self.config.overwrite
    }

    /// Download `download` into `folder`.
    ///
    /// The file lands at `join(folder, download.filename)`. When that target
    /// already exists it is reused and no request is sent, unless
    /// `overwrite` is set.
    pub async fn download(&self, download: &Download, folder: impl IntoLocation) -> Result<Summary> {
        let folder = folder.into_location()?;
        let target = folder.join(&download.filename);

        if !self.config.overwrite && self.config.fs.exists(&target).await? {
            info!("Using existing file {}", download.filename);
            let size = self.existing_size(&target).await?;
            let summary = Summary::new(download.clone(), target, size).skip("file already exists");
            self.notify(&summary);
            return Ok(summary);
        }

        info!("Downloading {}", download.url);
        let scratch = tempfile::tempdir()?;
        let staged = scratch.path().join(&download.filename);
        let size = self.fetch(download, &staged).await?;

        match &target {
            Location::Remote(uri) => {
                debug!("Uploading {:?} to {}", staged, uri);
                self.config.fs.upload_to_uri(&staged, uri).await?;
            }
            Location::Local(path) => {
                if let Some(dir) = path.parent() {
                    fs::create_dir_all(dir).await?;
                }
                fs::copy(&staged, path).await?;
            }
        }

        let summary = Summary::new(download.clone(), target, size).with_status(Status::Success);
        self.notify(&summary);
        Ok(summary)
    }

    /// Stream the body of `download` into `output` and return its size.
    async fn fetch(&self, download: &Download, output: &Path) -> Result<u64> {
        let client = create_http_client(self.config.http_client_config())?;

        debug!("Fetching {}", &download.url);
        let res = client.get(download.url.as_str()).send().await?;
        let res = res.error_for_status()?;

        let pb = self
            .config
            .progress
            .clone()
            .to_progress_bar(res.content_length().unwrap_or(0));
        pb.set_message(download.filename.clone());

        debug!("Creating staging file {:?}", output);
        let mut file = fs::File::create(output).await?;

        let mut size: u64 = 0;
        let mut stream = res.bytes_stream();
        while let Some(item) = stream.next().await {
            let mut chunk = item?;
            let chunk_size = chunk.len() as u64;
            size += chunk_size;
            pb.inc(chunk_size);
            file.write_all_buf(&mut chunk).await?;
        }
        file.flush().await?;

        self.config.progress.finish(&pb);
        debug!("Fetched {} bytes from {}", size, download.url);
        Ok(size)
    }

    async fn existing_size(&self, target: &Location) -> Result<u64> {
        match target {
            Location::Local(path) => Ok(fs::metadata(path).await?.len()),
            Location::Remote(uri) => {
                let store = self.config.fs.store(uri)?;
                Ok(store.head(uri).await?.map_or(0, |meta| meta.size as u64))
            }
        }
    }

    fn notify(&self, summary: &Summary) {
        if let Some(ref callback) = self.config.on_complete {
            callback(summary);
        }
    }
}

/// Download `url` into `folder` with the default settings.
///
/// Returns where the file ended up. An existing file is reused.
pub async fn download_url(url: &str, folder: impl IntoLocation) -> Result<Location> {
    let download = Download::try_from(url)?;
    let downloader = super::UrlDownloaderBuilder::new().build();
    Ok(downloader.download(&download, folder).await?.into_location())
}
