//! Single-file `.gz` and `.bz2` decompression.
//!
//! The output is written to `folder/<input file name minus its last
//! extension>`, so `edges.csv.gz` becomes `folder/edges.csv`.

use super::blocking;
use crate::error::{Error, Result};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Decompress the bzip2 file at `path` into `folder` and return the output path.
pub async fn extract_bz2(path: impl AsRef<Path>, folder: impl AsRef<Path>) -> Result<PathBuf> {
    let (path, output) = prepare(path.as_ref(), folder.as_ref())?;
    debug!("Extracting {:?}", path);
    blocking(move || {
        let reader = MultiBzDecoder::new(BufReader::new(File::open(&path)?));
        decompress(reader, &path, output)
    })
    .await
}

/// Decompress the gzip file at `path` into `folder` and return the output path.
pub async fn extract_gz(path: impl AsRef<Path>, folder: impl AsRef<Path>) -> Result<PathBuf> {
    let (path, output) = prepare(path.as_ref(), folder.as_ref())?;
    debug!("Extracting {:?}", path);
    blocking(move || {
        let reader = MultiGzDecoder::new(BufReader::new(File::open(&path)?));
        decompress(reader, &path, output)
    })
    .await
}

/// Absolute input path and the output path inside `folder`.
fn prepare(path: &Path, folder: &Path) -> Result<(PathBuf, PathBuf)> {
    let path = std::path::absolute(path)?;
    if path.extension().is_none() {
        return Err(Error::UnsupportedArchive(format!(
            "{} has no extension to strip",
            path.display()
        )));
    }
    let stem = path.file_stem().ok_or_else(|| {
        Error::UnsupportedArchive(format!("{} has no file name", path.display()))
    })?;
    let output = folder.join(stem);
    Ok((path, output))
}

fn decompress<R: Read>(mut reader: R, source: &Path, output: PathBuf) -> Result<PathBuf> {
    if let Some(parent) = output.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(&output)?);
    let size = io::copy(&mut reader, &mut writer).map_err(|e| {
        Error::archive_with_source(format!("failed to decompress {}", source.display()), e)
    })?;
    writer.flush()?;
    debug!("Wrote {} bytes to {:?}", size, output);
    Ok(output)
}
