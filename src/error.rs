//! Error handling for mlutilz.
//!
//! Every helper in the crate forwards failures from the library it wraps
//! (filesystem, object storage, HTTP, archive decoders) through the single
//! [`Error`] enum defined here.

use std::io;
use thiserror::Error;

/// Errors that can happen when using mlutilz.
#[derive(Error, Debug)]
pub enum Error {
    /// Error from an underlying system.
    ///
    /// Typically a blocking task that panicked or was cancelled.
    #[error("Internal error: {0}")]
    Internal(String),

    /// Error from the underlying URL parser or the expected URL format.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A remote URI that cannot be split into a bucket and a key.
    #[error("Invalid location: {0}")]
    InvalidLocation(String),

    /// A remote location was given where only a local path is accepted.
    #[error("{0} must be a local path")]
    NotLocal(String),

    /// An archive mode or format this crate does not handle.
    #[error("Unsupported archive: {0}")]
    UnsupportedArchive(String),

    /// Failure while reading or unpacking an archive.
    #[error("Archive error: {message}")]
    Archive {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No type registered under the requested name.
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// I/O Error.
    #[error("I/O error")]
    IOError {
        #[from]
        source: io::Error,
    },

    /// Error from the Reqwest library.
    #[error("Reqwest Error")]
    Reqwest {
        #[from]
        source: reqwest::Error,
    },

    /// Error raised by the HTTP middleware stack (retries, tracing).
    #[error("HTTP middleware error")]
    Middleware {
        #[from]
        source: reqwest_middleware::Error,
    },

    /// Error from the object storage client.
    #[error("Object store error")]
    ObjectStore {
        #[from]
        source: object_store::Error,
    },
}

impl Error {
    pub fn archive_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Archive {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<tokio::task::JoinError> for Error {
    fn from(e: tokio::task::JoinError) -> Self {
        Error::Internal(format!("blocking task failed: {}", e))
    }
}

/// Result type alias for operations that can fail with an mlutilz error.
pub type Result<T> = std::result::Result<T, Error>;
