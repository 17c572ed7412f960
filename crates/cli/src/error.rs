//! Errors raised before and during an operation.

use std::io;
use std::os::fd::RawFd;
use std::path::PathBuf;

use archive::SessionError;

/// Problems with the process arguments or the inherited socket.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Fewer than two arguments followed the program name.
    #[error("not enough arguments ({count})")]
    TooFewArguments {
        /// Total argument count, program name included.
        count: usize,
    },

    /// The socket argument was not a non-negative integer.
    #[error("invalid socket descriptor {value:?}")]
    InvalidDescriptor {
        /// The rejected argument.
        value: String,
    },

    /// The operation was neither `backup` nor `restore`.
    #[error("unknown operation {name}")]
    UnknownOperation {
        /// The rejected operation name.
        name: String,
    },

    /// The descriptor number did not name an open descriptor.
    #[error("cannot use socket descriptor {fd}: {source}")]
    Socket {
        /// The descriptor number.
        fd: RawFd,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
}

/// Failures inside a backup or restore driver.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The operation arguments did not parse.
    #[error("{0}")]
    Usage(#[from] clap::Error),

    /// The archive session failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A local path could not be read or written.
    #[error("{}: {source}", path.display())]
    Path {
        /// The path involved.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: io::Error,
    },
}

impl DriverError {
    pub(crate) fn path(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Path {
            path: path.into(),
            source,
        }
    }
}

impl From<io::Error> for DriverError {
    fn from(source: io::Error) -> Self {
        Self::Session(SessionError::Io(source))
    }
}
