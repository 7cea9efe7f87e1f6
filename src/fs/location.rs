//! Local/remote path classification.
//!
//! A [`Location`] is either a path on the local filesystem or a URI into an
//! object store. Strings are classified by prefix: `gs://`, `gcs://` and
//! `s3://` are remote, everything else is local. Values built from
//! [`Path`]/[`PathBuf`] are always local, whatever their text says.
//!
//! # Examples
//!
//! ```rust
//! use mlutilz::fs::{is_local, join};
//!
//! assert!(!is_local("gs://bucket/data"));
//! assert!(is_local("/tmp/data"));
//!
//! let joined = join("gs://bucket/data/", ["train", "part-0.parquet"])?;
//! assert_eq!(joined.to_string(), "gs://bucket/data/train/part-0.parquet");
//! # Ok::<(), mlutilz::Error>(())
//! ```

use crate::error::{Error, Result};

use std::fmt;
use std::path::{Path, PathBuf};

/// Object store flavour, derived from the URI prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    /// `gs://`
    Gs,
    /// `gcs://`
    Gcs,
    /// `s3://`
    S3,
}

impl Scheme {
    const ALL: [Scheme; 3] = [Scheme::Gs, Scheme::Gcs, Scheme::S3];

    /// URI prefix including the `://` separator.
    pub fn prefix(&self) -> &'static str {
        match self {
            Scheme::Gs => "gs://",
            Scheme::Gcs => "gcs://",
            Scheme::S3 => "s3://",
        }
    }

    /// Whether this scheme is served by Google Cloud Storage.
    pub fn is_gcs(&self) -> bool {
        matches!(self, Scheme::Gs | Scheme::Gcs)
    }

    fn detect(value: &str) -> Option<Scheme> {
        Self::ALL.into_iter().find(|s| value.starts_with(s.prefix()))
    }
}

/// An object (or prefix) inside a bucket.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteUri {
    pub scheme: Scheme,
    pub bucket: String,
    /// Key inside the bucket, without the leading slash. May be empty.
    pub key: String,
}

impl RemoteUri {
    pub fn new(scheme: Scheme, bucket: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            scheme,
            bucket: bucket.into(),
            key: key.into(),
        }
    }

    /// Parse a `<scheme>://<bucket>[/<key>]` string.
    pub fn parse(value: &str) -> Result<Self> {
        let scheme = Scheme::detect(value).ok_or_else(|| {
            Error::InvalidLocation(format!("\"{}\" has no object store prefix", value))
        })?;
        let rest = &value[scheme.prefix().len()..];
        let (bucket, key) = match rest.split_once('/') {
            Some((bucket, key)) => (bucket, key),
            None => (rest, ""),
        };
        if bucket.is_empty() {
            return Err(Error::InvalidLocation(format!(
                "\"{}\" does not name a bucket",
                value
            )));
        }
        Ok(Self::new(scheme, bucket, key))
    }

    /// The key as an object store path.
    pub fn object_path(&self) -> object_store::path::Path {
        object_store::path::Path::from(self.key.as_str())
    }

    /// Last segment of the key, ignoring a trailing slash.
    pub fn file_name(&self) -> &str {
        self.key
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }

    /// Same bucket and scheme, different key.
    pub fn with_key(&self, key: impl Into<String>) -> Self {
        Self::new(self.scheme, self.bucket.clone(), key)
    }

    /// Append `part` after stripping trailing slashes from the current key.
    pub fn join(&self, part: &str) -> Self {
        let base = self.key.trim_end_matches('/');
        let key = if base.is_empty() {
            part.to_string()
        } else {
            format!("{}/{}", base, part)
        };
        self.with_key(key)
    }
}

impl fmt::Display for RemoteUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.key.is_empty() {
            write!(f, "{}{}", self.scheme.prefix(), self.bucket)
        } else {
            write!(f, "{}{}/{}", self.scheme.prefix(), self.bucket, self.key)
        }
    }
}

/// A path routed either to the local filesystem or to an object store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Local(PathBuf),
    Remote(RemoteUri),
}

impl Location {
    /// Classify a string by its prefix.
    ///
    /// Fails only for remote URIs without a bucket such as `"gs://"`.
    pub fn parse(value: &str) -> Result<Self> {
        match Scheme::detect(value) {
            Some(_) => RemoteUri::parse(value).map(Location::Remote),
            None => Ok(Location::Local(PathBuf::from(value))),
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, Location::Local(_))
    }

    pub fn is_gcs(&self) -> bool {
        matches!(self, Location::Remote(uri) if uri.scheme.is_gcs())
    }

    pub fn as_local(&self) -> Option<&Path> {
        match self {
            Location::Local(path) => Some(path),
            Location::Remote(_) => None,
        }
    }

    pub fn as_remote(&self) -> Option<&RemoteUri> {
        match self {
            Location::Local(_) => None,
            Location::Remote(uri) => Some(uri),
        }
    }

    /// The local path, or [`Error::NotLocal`] for a remote location.
    pub fn into_local(self) -> Result<PathBuf> {
        match self {
            Location::Local(path) => Ok(path),
            Location::Remote(uri) => Err(Error::NotLocal(uri.to_string())),
        }
    }

    /// Last path segment, if any.
    pub fn file_name(&self) -> Option<String> {
        match self {
            Location::Local(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned()),
            Location::Remote(uri) => {
                let name = uri.file_name();
                (!name.is_empty()).then(|| name.to_string())
            }
        }
    }

    /// Join one or more parts onto this location.
    ///
    /// A remote base loses its trailing slashes once, then every part is
    /// appended after a `/` exactly as given, empty parts included.
    pub fn join(&self, parts: impl JoinParts) -> Location {
        let parts = parts.into_parts();
        match self {
            Location::Local(path) => {
                let mut joined = path.clone();
                for part in &parts {
                    joined.push(part);
                }
                Location::Local(joined)
            }
            Location::Remote(uri) => {
                let mut parts = parts.into_iter();
                let mut joined = match parts.next() {
                    Some(first) => uri.join(&first),
                    None => return Location::Remote(uri.clone()),
                };
                for part in parts {
                    joined.key = format!("{}/{}", joined.key, part);
                }
                Location::Remote(joined)
            }
        }
    }
}

/// The `parts` argument of [`join`]: a single part or a list of them.
pub trait JoinParts {
    fn into_parts(self) -> Vec<String>;
}

impl JoinParts for &str {
    fn into_parts(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl JoinParts for String {
    fn into_parts(self) -> Vec<String> {
        vec![self]
    }
}

impl JoinParts for &String {
    fn into_parts(self) -> Vec<String> {
        vec![self.clone()]
    }
}

impl<S: AsRef<str>> JoinParts for Vec<S> {
    fn into_parts(self) -> Vec<String> {
        self.iter().map(|part| part.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> JoinParts for &[S] {
    fn into_parts(self) -> Vec<String> {
        self.iter().map(|part| part.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> JoinParts for [S; N] {
    fn into_parts(self) -> Vec<String> {
        self.iter().map(|part| part.as_ref().to_string()).collect()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Location::Local(path) => write!(f, "{}", path.display()),
            Location::Remote(uri) => write!(f, "{}", uri),
        }
    }
}

impl From<RemoteUri> for Location {
    fn from(uri: RemoteUri) -> Self {
        Location::Remote(uri)
    }
}

impl From<PathBuf> for Location {
    fn from(path: PathBuf) -> Self {
        Location::Local(path)
    }
}

impl From<&Path> for Location {
    fn from(path: &Path) -> Self {
        Location::Local(path.to_path_buf())
    }
}

impl From<&PathBuf> for Location {
    fn from(path: &PathBuf) -> Self {
        Location::Local(path.clone())
    }
}

/// Anything that can be turned into a [`Location`].
///
/// Implemented for strings (classified by prefix), paths (always local) and
/// locations themselves.
pub trait IntoLocation {
    fn into_location(self) -> Result<Location>;
}

impl IntoLocation for Location {
    fn into_location(self) -> Result<Location> {
        Ok(self)
    }
}

impl IntoLocation for &Location {
    fn into_location(self) -> Result<Location> {
        Ok(self.clone())
    }
}

impl IntoLocation for RemoteUri {
    fn into_location(self) -> Result<Location> {
        Ok(Location::Remote(self))
    }
}

impl IntoLocation for &RemoteUri {
    fn into_location(self) -> Result<Location> {
        Ok(Location::Remote(self.clone()))
    }
}

impl IntoLocation for &str {
    fn into_location(self) -> Result<Location> {
        Location::parse(self)
    }
}

impl IntoLocation for String {
    fn into_location(self) -> Result<Location> {
        Location::parse(&self)
    }
}

impl IntoLocation for &String {
    fn into_location(self) -> Result<Location> {
        Location::parse(self)
    }
}

impl IntoLocation for PathBuf {
    fn into_location(self) -> Result<Location> {
        Ok(Location::Local(self))
    }
}

impl IntoLocation for &PathBuf {
    fn into_location(self) -> Result<Location> {
        Ok(Location::Local(self.clone()))
    }
}

impl IntoLocation for &Path {
    fn into_location(self) -> Result<Location> {
        Ok(Location::Local(self.to_path_buf()))
    }
}

/// Whether `path` lives on the local filesystem.
///
/// Strings starting with `gs://`, `gcs://` or `s3://` are remote, and so is a
/// malformed remote URI such as `"gs://"`.
pub fn is_local(path: impl IntoLocation) -> bool {
    path.into_location().map_or(false, |location| location.is_local())
}

/// Whether `path` is a Google Cloud Storage URI (`gs://` or `gcs://`).
pub fn is_gcs_path(path: impl IntoLocation) -> bool {
    path.into_location().map_or(false, |location| location.is_gcs())
}

/// Return `path` as a local [`PathBuf`], or [`Error::NotLocal`].
pub fn local_path(path: impl IntoLocation) -> Result<PathBuf> {
    path.into_location()?.into_local()
}

/// Join one or more parts onto `path`.
///
/// `parts` is a single string or a list. Remote paths have their trailing
/// slashes stripped once, then each part is appended with a `/`. Local paths
/// use [`Path::join`].
pub fn join(path: impl IntoLocation, parts: impl JoinParts) -> Result<Location> {
    Ok(path.into_location()?.join(parts))
}
