//! # Overview
//!
//! Gzip streams layered over a byte transport. [`GzipStream`] owns the
//! transport for its whole lifetime: once a descriptor is wrapped, every read
//! or write goes through the compressor, which performs the underlying I/O
//! itself. Reading accepts concatenated gzip members the way `gzread` does.
//!
//! # Examples
//!
//! ```
//! use std::io::{Cursor, Read, Write};
//! use compress::gzip::GzipStream;
//! use compress::StreamMode;
//!
//! let mut writer = GzipStream::open(Cursor::new(Vec::new()), &"wb6".parse().unwrap());
//! writer.write_all(b"payload").unwrap();
//! let compressed = writer.finish().unwrap().into_inner();
//!
//! let mut reader = GzipStream::open(Cursor::new(compressed), &StreamMode::read());
//! let mut decoded = Vec::new();
//! reader.read_to_end(&mut decoded).unwrap();
//! assert_eq!(decoded, b"payload");
//! ```

use std::{
    fmt,
    io::{self, Read, Write},
    num::NonZeroU8,
};

use flate2::{Compression, read::MultiGzDecoder, write::GzEncoder};

use crate::mode::{StreamDirection, StreamMode};

/// Compression levels recognised by the gzip encoder.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CompressionLevel {
    /// Store blocks without compressing (`0`).
    None,
    /// Use zlib's default balance between speed and ratio.
    #[default]
    Default,
    /// Use an explicit zlib compression level in the range `1..=9`.
    Precise(NonZeroU8),
}

impl CompressionLevel {
    /// Creates a level from its numeric zlib value.
    ///
    /// `0` selects [`CompressionLevel::None`]; `1..=9` select
    /// [`CompressionLevel::Precise`]; larger values are rejected.
    pub fn from_numeric(level: u32) -> Result<Self, CompressionLevelError> {
        match u8::try_from(level) {
            Ok(value @ 0..=9) => Ok(NonZeroU8::new(value).map_or(Self::None, Self::Precise)),
            _ => Err(CompressionLevelError::new(level)),
        }
    }
}

impl From<CompressionLevel> for Compression {
    fn from(level: CompressionLevel) -> Self {
        match level {
            CompressionLevel::None => Compression::none(),
            CompressionLevel::Default => Compression::default(),
            CompressionLevel::Precise(value) => Compression::new(u32::from(value.get())),
        }
    }
}

/// Error returned when a requested compression level falls outside the
/// permissible zlib range.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CompressionLevelError {
    level: u32,
}

impl CompressionLevelError {
    const fn new(level: u32) -> Self {
        Self { level }
    }

    /// Returns the invalid compression level that triggered the error.
    #[must_use]
    pub const fn level(&self) -> u32 {
        self.level
    }
}

impl fmt::Display for CompressionLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "compression level {} is outside the supported range 0-9",
            self.level
        )
    }
}

impl std::error::Error for CompressionLevelError {}

/// A transport wrapped in a gzip decoder or encoder, chosen by the open mode.
pub enum GzipStream<S: Write> {
    /// Decompresses bytes read from the transport.
    Decoder(MultiGzDecoder<S>),
    /// Compresses bytes written to the transport.
    Encoder(GzEncoder<S>),
}

impl<S: Read + Write> GzipStream<S> {
    /// Wraps `inner` according to `mode`.
    ///
    /// Write and append modes compress at the mode's level; read mode
    /// decompresses.
    pub fn open(inner: S, mode: &StreamMode) -> Self {
        if mode.direction().is_write() {
            Self::Encoder(GzEncoder::new(inner, mode.level().into()))
        } else {
            Self::Decoder(MultiGzDecoder::new(inner))
        }
    }

    /// Returns the direction the stream was opened in.
    #[must_use]
    pub const fn direction(&self) -> StreamDirection {
        match self {
            Self::Decoder(_) => StreamDirection::Read,
            Self::Encoder(_) => StreamDirection::Write,
        }
    }

    /// Borrows the wrapped transport.
    #[must_use]
    pub fn get_ref(&self) -> &S {
        match self {
            Self::Decoder(decoder) => decoder.get_ref(),
            Self::Encoder(encoder) => encoder.get_ref(),
        }
    }

    /// Completes the stream and returns the wrapped transport.
    ///
    /// For encoders this emits the gzip trailer. Decoders discard any
    /// read-ahead buffered from the transport.
    pub fn finish(self) -> io::Result<S> {
        match self {
            Self::Decoder(decoder) => Ok(decoder.into_inner()),
            Self::Encoder(encoder) => encoder.finish(),
        }
    }
}

fn wrong_direction(operation: &str, direction: StreamDirection) -> io::Error {
    io::Error::new(
        io::ErrorKind::Unsupported,
        format!("cannot {operation} a gzip stream opened for {direction}"),
    )
}

impl<S: Read + Write> Read for GzipStream<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Decoder(decoder) => decoder.read(buf),
            Self::Encoder(_) => Err(wrong_direction("read", StreamDirection::Write)),
        }
    }
}

impl<S: Read + Write> Write for GzipStream<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Encoder(encoder) => encoder.write(buf),
            Self::Decoder(_) => Err(wrong_direction("write", StreamDirection::Read)),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Encoder(encoder) => encoder.flush(),
            Self::Decoder(_) => Ok(()),
        }
    }
}

impl<S: Write> fmt::Debug for GzipStream<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Decoder(_) => "Decoder",
            Self::Encoder(_) => "Encoder",
        };
        f.debug_tuple("GzipStream").field(&variant).finish()
    }
}

/// Compresses `input` into a new gzip [`Vec`].
pub fn compress_to_vec(input: &[u8], level: CompressionLevel) -> io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), level.into());
    encoder.write_all(input)?;
    encoder.finish()
}

/// Decompresses a gzip buffer (one or more members) into a new [`Vec`].
pub fn decompress_to_vec(input: &[u8]) -> io::Result<Vec<u8>> {
    let mut decoder = MultiGzDecoder::new(input);
    let mut output = Vec::new();
    io::copy(&mut decoder, &mut output)?;
    Ok(output)
}
