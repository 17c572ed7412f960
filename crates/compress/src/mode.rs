//! Transfer mode strings in the style accepted by zlib's `gzdopen`.
//!
//! A mode is scanned left to right: `r`, `w` and `a` select the direction
//! (the last one wins), a digit selects the compression level, and every
//! other character (`b`, `x`, `e`, strategy letters such as `f`, `h`, `R`,
//! `F`, `T`) is accepted and ignored. A mode without a direction is invalid.

use core::fmt;
use core::str::FromStr;

use crate::gzip::CompressionLevel;

/// Direction in which a stream is opened.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum StreamDirection {
    /// Bytes are read (and decompressed) from the stream.
    Read,
    /// Bytes are written (and compressed) to the stream.
    Write,
    /// Bytes are appended; behaves like [`StreamDirection::Write`] on a socket.
    Append,
}

impl StreamDirection {
    /// Reports whether the stream produces output.
    #[must_use]
    pub const fn is_write(self) -> bool {
        matches!(self, StreamDirection::Write | StreamDirection::Append)
    }
}

impl fmt::Display for StreamDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            StreamDirection::Read => "read",
            StreamDirection::Write => "write",
            StreamDirection::Append => "append",
        })
    }
}

/// Parsed transfer mode.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StreamMode {
    direction: StreamDirection,
    level: CompressionLevel,
}

impl StreamMode {
    /// Creates a mode from its parts.
    #[must_use]
    pub const fn new(direction: StreamDirection, level: CompressionLevel) -> Self {
        Self { direction, level }
    }

    /// Read mode (`"r"`).
    #[must_use]
    pub const fn read() -> Self {
        Self::new(StreamDirection::Read, CompressionLevel::Default)
    }

    /// Write mode at the default level (`"w"`).
    #[must_use]
    pub const fn write() -> Self {
        Self::new(StreamDirection::Write, CompressionLevel::Default)
    }

    /// Returns the stream direction.
    #[must_use]
    pub const fn direction(&self) -> StreamDirection {
        self.direction
    }

    /// Returns the compression level used when writing.
    #[must_use]
    pub const fn level(&self) -> CompressionLevel {
        self.level
    }
}

/// Error returned when a transfer mode does not name a direction.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct StreamModeError {
    input: String,
}

impl StreamModeError {
    fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the rejected mode string.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for StreamModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "transfer mode {:?} does not select read, write or append",
            self.input
        )
    }
}

impl std::error::Error for StreamModeError {}

impl FromStr for StreamMode {
    type Err = StreamModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut direction = None;
        let mut level = CompressionLevel::Default;

        for ch in s.chars() {
            match ch {
                'r' => direction = Some(StreamDirection::Read),
                'w' => direction = Some(StreamDirection::Write),
                'a' => direction = Some(StreamDirection::Append),
                '0'..='9' => {
                    let digit = ch.to_digit(10).unwrap_or_default();
                    if let Ok(parsed) = CompressionLevel::from_numeric(digit) {
                        level = parsed;
                    }
                }
                _ => {}
            }
        }

        direction
            .map(|direction| Self::new(direction, level))
            .ok_or_else(|| StreamModeError::new(s))
    }
}
