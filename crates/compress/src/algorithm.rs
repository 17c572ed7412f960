//! Compression selector accepted by the archive session factory.

use core::fmt;
use core::str::FromStr;

/// Compression applied to the archive byte stream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum CompressionAlgorithm {
    /// Archive bytes travel over the socket unchanged.
    #[default]
    None,
    /// Archive bytes are wrapped in a gzip stream.
    Gzip,
}

impl CompressionAlgorithm {
    /// Returns the canonical selector name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            CompressionAlgorithm::None => "none",
            CompressionAlgorithm::Gzip => "gzip",
        }
    }

    /// Parses an optional selector; an absent selector means no compression.
    pub fn from_selector(selector: Option<&str>) -> Result<Self, CompressionAlgorithmParseError> {
        selector.map_or(Ok(CompressionAlgorithm::None), |value| value.parse())
    }
}

impl fmt::Display for CompressionAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when attempting to parse an unsupported compression selector.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CompressionAlgorithmParseError {
    input: String,
}

impl CompressionAlgorithmParseError {
    /// Creates a parse error capturing the original input.
    #[must_use]
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// Returns the invalid input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for CompressionAlgorithmParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported compression selector: {}", self.input)
    }
}

impl std::error::Error for CompressionAlgorithmParseError {}

impl FromStr for CompressionAlgorithm {
    type Err = CompressionAlgorithmParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("none") {
            Ok(CompressionAlgorithm::None)
        } else if s.eq_ignore_ascii_case("gzip") {
            Ok(CompressionAlgorithm::Gzip)
        } else {
            Err(CompressionAlgorithmParseError::new(s))
        }
    }
}
