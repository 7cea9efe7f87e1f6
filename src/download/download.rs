//! A single URL to fetch and the file name it is saved under.
//!
//! # Examples
//!
//! ```rust
//! use mlutilz::download::Download;
//! use std::convert::TryFrom;
//!
//! let download = Download::try_from("https://example.com/data/cora.tgz?raw=1")?;
//! assert_eq!(download.filename, "cora.tgz");
//! # Ok::<(), mlutilz::Error>(())
//! ```

use crate::error::{Error, Result};

use reqwest::Url;
use std::convert::TryFrom;

/// Represents a file to be downloaded.
#[derive(Debug, Clone)]
pub struct Download {
    /// URL of the file to download.
    pub url: Url,
    /// File name used to save the file.
    pub filename: String,
}

impl Download {
    /// Creates a new [`Download`] with an explicit file name.
    ///
    /// [`Download::try_from`] derives the name from the URL instead, see
    /// [`filename_from_url`].
    pub fn new(url: &Url, filename: &str) -> Self {
        Self {
            url: url.clone(),
            filename: String::from(filename),
        }
    }
}

/// File name a URL is saved under.
///
/// Takes the text after the last `/`. When that text starts with `?` it is
/// kept as is, otherwise the query string is cut off.
///
/// ```rust
/// use mlutilz::download::filename_from_url;
///
/// assert_eq!(filename_from_url("https://host/a/b.zip?dl=1")?, "b.zip");
/// assert_eq!(filename_from_url("https://host/get/?id=7")?, "?id=7");
/// # Ok::<(), mlutilz::Error>(())
/// ```
pub fn filename_from_url(url: &str) -> Result<String> {
    let last = url.rsplit('/').next().unwrap_or(url);
    let filename = if last.starts_with('?') {
        last
    } else {
        last.split('?').next().unwrap_or(last)
    };

    if filename.is_empty() {
        return Err(Error::InvalidUrl(format!(
            "The url \"{}\" does not contain a filename",
            url
        )));
    }
    Ok(filename.to_string())
}

impl TryFrom<&Url> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &Url) -> Result<Self> {
        filename_from_url(value.as_str()).map(|filename| Download {
            url: value.clone(),
            filename,
        })
    }
}

impl TryFrom<&str> for Download {
    type Error = crate::error::Error;

    fn try_from(value: &str) -> Result<Self> {
        let url = Url::parse(value).map_err(|e| {
            Error::InvalidUrl(format!("The url \"{}\" cannot be parsed: {}", value, e))
        })?;
        let filename = filename_from_url(value)?;
        Ok(Download { url, filename })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_strips_query() {
        assert_eq!(
            filename_from_url("https://host/files/model.bin?token=abc").unwrap(),
            "model.bin"
        );
    }

    #[test]
    fn test_filename_keeps_leading_query() {
        assert_eq!(filename_from_url("https://host/api/?file=x").unwrap(), "?file=x");
    }

    #[test]
    fn test_trailing_slash_has_no_filename() {
        assert!(matches!(
            filename_from_url("https://host/dir/"),
            Err(Error::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_unparsable_url() {
        assert!(matches!(
            Download::try_from("not a url/file.zip"),
            Err(Error::InvalidUrl(_))
        ));
    }
}
