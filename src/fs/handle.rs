//! Open file handles over either backend.
//!
//! [`FileHandle`] implements tokio's [`AsyncRead`] and [`AsyncWrite`] so the
//! caller does not need to know where the bytes live. Reading from a handle
//! opened for writing (or the other way around) fails with
//! [`io::ErrorKind::Unsupported`].
//!
//! Remote writes are uploaded in parts and only become visible once the
//! handle is closed, so always finish with [`FileHandle::close`] (or
//! [`close_fileptr`](super::close_fileptr)).

use object_store::buffered::{BufReader, BufWriter};
use std::fmt;
use std::io;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt, ReadBuf};

/// How to open a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    /// Read an existing file.
    #[default]
    Read,
    /// Create or truncate a file and write to it.
    Write,
}

/// A file opened on the local filesystem or in an object store.
pub enum FileHandle {
    /// Local file, readable or writable depending on how it was opened.
    Local { file: File, mode: OpenMode },
    /// Buffered ranged reads of a remote object.
    RemoteReader(BufReader),
    /// Multipart upload of a remote object.
    RemoteWriter(BufWriter),
}

impl fmt::Debug for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileHandle::Local { mode, .. } => f
                .debug_struct("FileHandle::Local")
                .field("mode", mode)
                .finish(),
            FileHandle::RemoteReader(_) => f.write_str("FileHandle::RemoteReader"),
            FileHandle::RemoteWriter(_) => f.write_str("FileHandle::RemoteWriter"),
        }
    }
}

impl FileHandle {
    /// The mode the handle was opened with.
    pub fn mode(&self) -> OpenMode {
        match self {
            FileHandle::Local { mode, .. } => *mode,
            FileHandle::RemoteReader(_) => OpenMode::Read,
            FileHandle::RemoteWriter(_) => OpenMode::Write,
        }
    }

    /// Flush pending data and release the handle.
    ///
    /// For remote writers this completes the upload.
    pub async fn close(mut self) -> io::Result<()> {
        if self.mode() == OpenMode::Write {
            self.shutdown().await?;
        }
        Ok(())
    }
}

fn wrong_direction(op: &str) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("file handle was not opened for {}", op),
    )
}

impl AsyncRead for FileHandle {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.get_mut() {
            FileHandle::Local {
                file,
                mode: OpenMode::Read,
            } => Pin::new(file).poll_read(cx, buf),
            FileHandle::RemoteReader(reader) => Pin::new(reader).poll_read(cx, buf),
            _ => Poll::Ready(Err(wrong_direction("reading"))),
        }
    }
}

impl AsyncWrite for FileHandle {
    fn poll_write(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        match self.get_mut() {
            FileHandle::Local {
                file,
                mode: OpenMode::Write,
            } => Pin::new(file).poll_write(cx, buf),
            FileHandle::RemoteWriter(writer) => Pin::new(writer).poll_write(cx, buf),
            _ => Poll::Ready(Err(wrong_direction("writing"))),
        }
    }

    fn poll_flush(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            FileHandle::Local { file, .. } => Pin::new(file).poll_flush(cx),
            FileHandle::RemoteWriter(writer) => Pin::new(writer).poll_flush(cx),
            FileHandle::RemoteReader(_) => Poll::Ready(Ok(())),
        }
    }

    fn poll_shutdown(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        match self.get_mut() {
            FileHandle::Local { file, .. } => Pin::new(file).poll_shutdown(cx),
            FileHandle::RemoteWriter(writer) => Pin::new(writer).poll_shutdown(cx),
            FileHandle::RemoteReader(_) => Poll::Ready(Ok(())),
        }
    }
}
