#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `transport` moves archive bytes between the tar engine and the socket the
//! parent process handed over. It owns the descriptor ([`SocketDescriptor`]),
//! chooses between a raw and a gzip-compressed channel
//! ([`TransportBackend`]), and hashes every transferred byte on the way
//! through ([`HashingStream`]).
//!
//! # Design
//!
//! The engine sees a single `Read + Write` value:
//!
//! ```text
//! tar engine -> HashingStream -> TransportBackend -> SocketDescriptor
//! ```
//!
//! [`StreamOps`] describes the four callbacks the engine relies on. The
//! hashing decorator implements them once, so raw and compressed channels
//! hash identically: digests always cover the uncompressed archive bytes.
//!
//! # Invariants
//!
//! - While an item name is set on the [`HashHandle`], the byte counter equals
//!   the sum of every buffer length hashed, regardless of how the backend
//!   chunks its I/O.
//! - Writes hash the full requested length before delivery. A write that
//!   fails afterwards leaves the undelivered bytes in the digests.
//! - Partial writes are retried on the unwritten tail; reads are never
//!   retried.
//!
//! # Errors
//!
//! All operations report [`std::io::Error`]. Failures are logged under the
//! `bu::io` target with the raw OS error number before being returned.
//!
//! # Examples
//!
//! ```
//! use std::io::{Cursor, Write};
//! use compress::{CompressionAlgorithm, StreamMode};
//! use transport::{HashHandle, HashingStream, TransportBackend};
//!
//! let hashes = HashHandle::new();
//! let backend = TransportBackend::open(
//!     Cursor::new(Vec::new()),
//!     CompressionAlgorithm::Gzip,
//!     &StreamMode::write(),
//! );
//! let mut stream = HashingStream::new(backend, hashes.clone());
//!
//! hashes.set_item("x");
//! stream.write_all(b"AAABBBC").unwrap();
//! assert_eq!(hashes.byte_count(), 7);
//! ```

mod backend;
mod hashing;
mod ops;
mod retry;
mod socket;

pub use backend::TransportBackend;
pub use hashing::{HashHandle, HashingStream};
pub use ops::StreamOps;
pub use retry::write_with_retry;
pub use socket::SocketDescriptor;
