//! Errors raised while creating or driving an archive session.

use std::io;

use compress::{CompressionAlgorithmParseError, StreamModeError};

use crate::session::ArchiveMode;

/// Error type for archive session construction and use.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The compression selector was not `none` or `gzip`.
    #[error(transparent)]
    Compression(#[from] CompressionAlgorithmParseError),

    /// The transfer mode did not select a direction.
    #[error(transparent)]
    Mode(#[from] StreamModeError),

    /// A session already exists for this run.
    #[error("an archive session was already created for this run")]
    AlreadyCreated,

    /// No session has been created yet.
    #[error("no archive session has been created")]
    NotCreated,

    /// The socket has been closed.
    #[error("the archive session has been closed")]
    Closed,

    /// The session was used against its direction.
    #[error("archive session opened for {actual} cannot {requested}")]
    WrongMode {
        /// Direction the session was created with.
        actual: ArchiveMode,
        /// Direction the caller needed.
        requested: ArchiveMode,
    },

    /// Archive I/O failed.
    #[error("archive I/O failed: {0}")]
    Io(#[from] io::Error),
}
