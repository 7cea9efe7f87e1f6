//! Outcome of a URL download.

use super::download::Download;
use crate::fs::Location;

/// Download status enumeration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Download not yet started
    NotStarted,
    /// The target already existed and was reused
    Skipped(String),
    /// Download completed successfully
    Success,
}

/// Represents a [`Download`] summary.
#[derive(Debug, Clone)]
pub struct Summary {
    download: Download,
    /// Where the file ended up.
    location: Location,
    /// Size in bytes, when known.
    size: u64,
    status: Status,
}

impl Summary {
    /// Create a new [`Download`] [`Summary`].
    pub fn new(download: Download, location: Location, size: u64) -> Self {
        Self {
            download,
            location,
            size,
            status: Status::NotStarted,
        }
    }

    /// Attach a status to a [`Download`] [`Summary`].
    pub fn with_status(self, status: Status) -> Self {
        Self { status, ..self }
    }

    /// Mark the summary as skipped with a message.
    pub fn skip(self, msg: impl std::fmt::Display) -> Self {
        self.with_status(Status::Skipped(msg.to_string()))
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn download(&self) -> &Download {
        &self.download
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    /// Consume the summary, keeping only where the file ended up.
    pub fn into_location(self) -> Location {
        self.location
    }
}
