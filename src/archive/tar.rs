//! Tar archive extraction.

use super::blocking;
use crate::error::{Error, Result};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Mode used when none is given: gzip-compressed tar.
pub const DEFAULT_TAR_MODE: &str = "r:gz";

const GZIP_MAGIC: &[u8] = &[0x1f, 0x8b];
const BZIP2_MAGIC: &[u8] = b"BZh";

/// Compression applied around the tar stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TarCompression {
    /// Detect gzip or bzip2 from the first bytes, plain tar otherwise.
    Auto,
    /// Plain, uncompressed tar.
    None,
    Gzip,
    Bzip2,
}

impl FromStr for TarCompression {
    type Err = Error;

    /// Parse a read mode such as `"r:gz"`.
    ///
    /// Accepted: `r`, `r:*`, `r:`, `r:gz`, `r:bz2`.
    fn from_str(mode: &str) -> Result<Self> {
        match mode {
            "r" | "r:*" => Ok(TarCompression::Auto),
            "r:" => Ok(TarCompression::None),
            "r:gz" => Ok(TarCompression::Gzip),
            "r:bz2" => Ok(TarCompression::Bzip2),
            other => Err(Error::UnsupportedArchive(format!(
                "tar mode \"{}\" is not supported",
                other
            ))),
        }
    }
}

impl TarCompression {
    /// Sniff the compression of the file at `path` from its magic bytes.
    pub fn detect(path: &Path) -> Result<Self> {
        let mut header = Vec::with_capacity(3);
        File::open(path)?.take(3).read_to_end(&mut header)?;
        if header.starts_with(GZIP_MAGIC) {
            Ok(TarCompression::Gzip)
        } else if header.starts_with(BZIP2_MAGIC) {
            Ok(TarCompression::Bzip2)
        } else {
            Ok(TarCompression::None)
        }
    }
}

/// Extract the tar archive at `path` into `folder`.
///
/// `mode` follows the usual read modes (`"r:gz"`, `"r:bz2"`, `"r:"` or `"r"` to
/// auto-detect). Entries that would land outside `folder` are skipped by the
/// unpacker.
pub async fn extract_tar(
    path: impl AsRef<Path>,
    folder: impl AsRef<Path>,
    mode: &str,
) -> Result<()> {
    let compression = mode.parse::<TarCompression>()?;
    let path = path.as_ref().to_path_buf();
    let folder = folder.as_ref().to_path_buf();

    debug!("Extracting {:?}", path);
    blocking(move || unpack(&path, &folder, compression)).await
}

fn unpack(path: &Path, folder: &Path, compression: TarCompression) -> Result<()> {
    let compression = match compression {
        TarCompression::Auto => TarCompression::detect(path)?,
        other => other,
    };

    let file = BufReader::new(File::open(path)?);
    let reader: Box<dyn Read> = match compression {
        TarCompression::Gzip => Box::new(MultiGzDecoder::new(file)),
        TarCompression::Bzip2 => Box::new(MultiBzDecoder::new(file)),
        TarCompression::None | TarCompression::Auto => Box::new(file),
    };

    fs::create_dir_all(folder)?;
    ::tar::Archive::new(reader).unpack(folder).map_err(|e| {
        Error::archive_with_source(format!("failed to unpack {}", path.display()), e)
    })
}
