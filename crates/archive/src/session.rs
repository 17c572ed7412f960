//! crates/archive/src/session.rs
//!
//! An archive session binds the tar engine to the hashing transport for the
//! rest of the run.

use std::fmt;
use std::io::{self, Read, Write};
use std::path::Path;

use checksums::HashSummary;
use compress::{CompressionAlgorithm, StreamDirection, StreamMode};
use tar::HeaderMode;
use transport::{HashHandle, HashingStream, TransportBackend};

use crate::error::SessionError;
use crate::xattrs;

/// The byte stream the tar engine drives.
pub type ArchiveStream<S> = HashingStream<TransportBackend<S>>;

/// Whether the session extracts or produces an archive.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ArchiveMode {
    /// Entries are read from the socket.
    Read,
    /// Entries are written to the socket.
    Write,
}

impl From<StreamDirection> for ArchiveMode {
    fn from(direction: StreamDirection) -> Self {
        if direction.is_write() {
            Self::Write
        } else {
            Self::Read
        }
    }
}

impl fmt::Display for ArchiveMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Read => "read",
            Self::Write => "write",
        })
    }
}

enum Engine<S: Read + Write> {
    Reader(tar::Archive<ArchiveStream<S>>),
    Writer(tar::Builder<ArchiveStream<S>>),
}

/// A tar engine bound to the transport backend, valid for one run.
pub struct ArchiveSession<S: Read + Write> {
    engine: Engine<S>,
    compression: CompressionAlgorithm,
    hashes: HashHandle,
}

impl<S: Read + Write> ArchiveSession<S> {
    /// Parses the selector and transfer mode, then binds `socket`.
    ///
    /// An absent selector means no compression.
    pub fn create(
        socket: S,
        compression: Option<&str>,
        transfer_mode: &str,
    ) -> Result<Self, SessionError> {
        let compression = CompressionAlgorithm::from_selector(compression)?;
        let mode: StreamMode = transfer_mode.parse()?;
        Ok(Self::from_parts(socket, compression, &mode))
    }

    /// Binds `socket` using already-parsed settings.
    ///
    /// The hash state starts zeroed and inactive.
    pub fn from_parts(socket: S, compression: CompressionAlgorithm, mode: &StreamMode) -> Self {
        let hashes = HashHandle::new();
        let backend = TransportBackend::open(socket, compression, mode);
        let stream = HashingStream::new(backend, hashes.clone());

        let engine = match ArchiveMode::from(mode.direction()) {
            ArchiveMode::Write => {
                let mut builder = tar::Builder::new(stream);
                builder.mode(HeaderMode::Complete);
                builder.follow_symlinks(false);
                Engine::Writer(builder)
            }
            ArchiveMode::Read => {
                let mut archive = tar::Archive::new(stream);
                archive.set_unpack_xattrs(true);
                archive.set_preserve_permissions(true);
                archive.set_preserve_mtime(true);
                archive.set_overwrite(true);
                Engine::Reader(archive)
            }
        };

        tracing::debug!(
            target: "bu::session",
            compression = %compression,
            direction = %mode.direction(),
            "archive session created"
        );

        Self {
            engine,
            compression,
            hashes,
        }
    }

    /// Returns the session direction.
    pub const fn mode(&self) -> ArchiveMode {
        match self.engine {
            Engine::Reader(_) => ArchiveMode::Read,
            Engine::Writer(_) => ArchiveMode::Write,
        }
    }

    /// Returns the compression in use.
    pub const fn compression(&self) -> CompressionAlgorithm {
        self.compression
    }

    /// Returns the hash handle shared with the transport.
    pub const fn hashes(&self) -> &HashHandle {
        &self.hashes
    }

    /// Names the member being transferred and activates hashing.
    pub fn set_current_item(&self, name: impl Into<String>) {
        self.hashes.set_item(name);
    }

    /// Clears the current member name; digests keep running totals.
    pub fn clear_current_item(&self) -> Option<String> {
        self.hashes.clear_item()
    }

    /// Snapshot of the session's digests.
    pub fn hash_summary(&self) -> HashSummary {
        self.hashes.summary()
    }

    /// Returns the tar writer, or [`SessionError::WrongMode`] for a reader.
    pub fn builder(&mut self) -> Result<&mut tar::Builder<ArchiveStream<S>>, SessionError> {
        match &mut self.engine {
            Engine::Writer(builder) => Ok(builder),
            Engine::Reader(_) => Err(SessionError::WrongMode {
                actual: ArchiveMode::Read,
                requested: ArchiveMode::Write,
            }),
        }
    }

    /// Returns the tar reader, or [`SessionError::WrongMode`] for a writer.
    pub fn archive(&mut self) -> Result<&mut tar::Archive<ArchiveStream<S>>, SessionError> {
        match &mut self.engine {
            Engine::Reader(archive) => Ok(archive),
            Engine::Writer(_) => Err(SessionError::WrongMode {
                actual: ArchiveMode::Write,
                requested: ArchiveMode::Read,
            }),
        }
    }

    /// Appends `path` as `name`, preceded by its extended attributes.
    ///
    /// Directories are appended as a single entry; callers walk them.
    pub fn append_path(&mut self, path: &Path, name: &Path) -> Result<(), SessionError> {
        let records = xattrs::collect(path)?;
        let builder = self.builder()?;
        if !records.is_empty() {
            builder.append_pax_extensions(
                records
                    .iter()
                    .map(|(key, value)| (key.as_str(), value.as_slice())),
            )?;
        }
        builder.append_path_with_name(path, name)?;
        Ok(())
    }

    /// Completes the archive and releases the socket.
    ///
    /// Writers emit the tar end-of-archive blocks and, when compressed, the
    /// gzip trailer.
    pub fn finish(self) -> io::Result<S> {
        let stream = match self.engine {
            Engine::Writer(builder) => builder.into_inner()?,
            Engine::Reader(archive) => archive.into_inner(),
        };
        stream.into_inner().finish()
    }
}

impl<S: Read + Write> fmt::Debug for ArchiveSession<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArchiveSession")
            .field("mode", &self.mode())
            .field("compression", &self.compression)
            .field("hashes", &self.hashes)
            .finish()
    }
}
