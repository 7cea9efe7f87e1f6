//! ZIP archive extraction, local or through an object store.
//!
//! A remote archive is first downloaded into a scratch directory; a remote
//! destination is extracted into the scratch directory and uploaded from
//! there. The scratch directory is removed when extraction finishes.

use super::blocking;
use crate::error::{Error, Result};
use crate::fs::{FileSystem, IntoLocation, Location};

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;
use tracing::debug;

/// Extract the ZIP archive at `path` into `folder`.
///
/// Either argument may be a `gs://`, `gcs://` or `s3://` URI.
pub async fn extract_zip(path: impl IntoLocation, folder: impl IntoLocation) -> Result<()> {
    extract_zip_with(&FileSystem::default(), path, folder).await
}

/// Same as [`extract_zip`], resolving remote paths through `fs`.
pub async fn extract_zip_with(
    fs: &FileSystem,
    path: impl IntoLocation,
    folder: impl IntoLocation,
) -> Result<()> {
    let source = path.into_location()?;
    let target = folder.into_location()?;
    debug!("Extracting {} to {}", source, target);

    let scratch = tempfile::tempdir()?;

    let archive = match &source {
        Location::Local(path) => path.clone(),
        Location::Remote(uri) => {
            let name = match uri.file_name() {
                "" => "archive.zip",
                name => name,
            };
            let local = scratch.path().join("source").join(name);
            fs.download_from_uri(uri, &local).await?;
            local
        }
    };

    let destination = match &target {
        Location::Local(path) => path.clone(),
        Location::Remote(_) => scratch.path().join("extracted"),
    };

    let unpack_into = destination.clone();
    blocking(move || unpack(&archive, &unpack_into)).await?;

    if let Location::Remote(uri) = &target {
        fs.upload_to_uri(&destination, uri).await?;
    }
    Ok(())
}

fn unpack(archive: &Path, destination: &Path) -> Result<()> {
    let file = BufReader::new(File::open(archive)?);
    let mut zip = ::zip::ZipArchive::new(file).map_err(|e| {
        Error::archive_with_source(format!("failed to open {}", archive.display()), e)
    })?;

    fs::create_dir_all(destination)?;
    zip.extract(destination).map_err(|e| {
        Error::archive_with_source(format!("failed to extract {}", archive.display()), e)
    })
}
