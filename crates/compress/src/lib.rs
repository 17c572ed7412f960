#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `compress` decides how archive bytes are framed on the wire. A session
//! names its compression with a selector (`"none"` or `"gzip"`) and its
//! direction with a transfer mode string such as `"r"` or `"wb6"`. This crate
//! parses both and provides the gzip stream that wraps the socket when
//! compression is requested.
//!
//! # Design
//!
//! - [`algorithm`] holds [`CompressionAlgorithm`], the case-insensitive
//!   selector.
//! - [`mode`] parses transfer modes into a [`StreamMode`] carrying a
//!   [`StreamDirection`] and a [`CompressionLevel`].
//! - [`gzip`] implements [`gzip::GzipStream`] on top of
//!   [`flate2`](https://docs.rs/flate2), plus one-shot helpers.
//!
//! # Invariants
//!
//! - Selectors are matched exactly apart from ASCII case; surrounding
//!   whitespace is not trimmed.
//! - A transfer mode must contain `r`, `w` or `a`; the last one wins.
//! - [`gzip::GzipStream::finish`] must be called to emit the gzip trailer.
//!
//! # Errors
//!
//! Parsing reports [`CompressionAlgorithmParseError`] or [`StreamModeError`].
//! Stream operations return [`std::io::Error`].
//!
//! # Examples
//!
//! ```
//! use compress::{CompressionAlgorithm, StreamDirection, StreamMode};
//!
//! let algorithm = CompressionAlgorithm::from_selector(Some("GZIP")).unwrap();
//! assert_eq!(algorithm, CompressionAlgorithm::Gzip);
//!
//! let mode: StreamMode = "wb9".parse().unwrap();
//! assert_eq!(mode.direction(), StreamDirection::Write);
//! ```

pub mod algorithm;
pub mod gzip;
pub mod mode;

pub use algorithm::{CompressionAlgorithm, CompressionAlgorithmParseError};
pub use gzip::{CompressionLevel, CompressionLevelError, GzipStream};
pub use mode::{StreamDirection, StreamMode, StreamModeError};
