//! Copy files and directories between the local filesystem and object stores.

use super::location::{IntoLocation, Location, RemoteUri};
use super::ops::FileSystem;
use super::store::RemoteStore;
use crate::error::{Error, Result};

use futures::StreamExt;
use object_store::buffered::BufWriter;
use object_store::path::Path as ObjectPath;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use walkdir::WalkDir;

impl FileSystem {
    /// Upload a local file to `uri`, or a local directory below `uri`.
    ///
    /// Directory uploads keep the layout: `dir/a/b.txt` lands at `uri/a/b.txt`.
    pub async fn upload_to_uri(&self, local: impl AsRef<Path>, uri: impl IntoLocation) -> Result<()> {
        let uri = remote_uri(uri)?;
        let store = self.store(&uri)?;
        let local = local.as_ref();

        if !fs::metadata(local).await?.is_dir() {
            upload_file(&store, local, &uri).await?;
            return Ok(());
        }

        let root = local.to_path_buf();
        let files = tokio::task::spawn_blocking(move || walk_files(&root)).await??;
        debug!("Uploading {} files from {:?} to {}", files.len(), local, uri);
        for (path, relative) in files {
            upload_file(&store, &path, &uri.join(&relative)).await?;
        }
        Ok(())
    }

    /// Download the object at `uri` to `local`.
    ///
    /// When `uri` names a prefix rather than an object, every object below it
    /// is written under the `local` directory.
    pub async fn download_from_uri(&self, uri: impl IntoLocation, local: impl AsRef<Path>) -> Result<()> {
        let uri = remote_uri(uri)?;
        let store = self.store(&uri)?;
        let local = local.as_ref();

        if store.head(&uri).await?.is_some() {
            download_object(&store, &uri.object_path(), local).await?;
            return Ok(());
        }

        let listing = store.list(&uri, true).await?;
        if listing.objects.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("nothing found at {}", uri),
            )
            .into());
        }

        let base = uri.key.trim_end_matches('/');
        debug!("Downloading {} objects from {} to {:?}", listing.objects.len(), uri, local);
        for meta in listing.objects {
            let key: &str = meta.location.as_ref();
            let relative = key
                .strip_prefix(base)
                .map(|k| k.trim_start_matches('/'))
                .unwrap_or(key);
            let target = relative
                .split('/')
                .fold(local.to_path_buf(), |path, segment| path.join(segment));
            download_object(&store, &meta.location, &target).await?;
        }
        Ok(())
    }
}

fn remote_uri(uri: impl IntoLocation) -> Result<RemoteUri> {
    match uri.into_location()? {
        Location::Remote(uri) => Ok(uri),
        Location::Local(path) => Err(Error::InvalidLocation(format!(
            "{} is not an object store URI",
            path.display()
        ))),
    }
}

async fn upload_file(store: &RemoteStore, path: &Path, uri: &RemoteUri) -> Result<u64> {
    let mut file = fs::File::open(path).await?;
    let mut writer = BufWriter::new(store.inner().clone(), uri.object_path());
    let size = tokio::io::copy(&mut file, &mut writer).await?;
    writer.shutdown().await?;
    debug!("Uploaded {:?} to {} ({} bytes)", path, uri, size);
    Ok(size)
}

async fn download_object(store: &RemoteStore, location: &ObjectPath, target: &Path) -> Result<u64> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut stream = store.inner().get(location).await?.into_stream();
    let mut file = fs::File::create(target).await?;
    let mut size = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        size += chunk.len() as u64;
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    debug!("Downloaded {} to {:?} ({} bytes)", location, target, size);
    Ok(size)
}

/// Regular files below `root` with their `/`-separated relative paths.
fn walk_files(root: &Path) -> Result<Vec<(PathBuf, String)>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| Error::Internal(e.to_string()))?
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        files.push((entry.into_path(), relative));
    }
    Ok(files)
}
