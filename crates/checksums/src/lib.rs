#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `checksums` provides the streaming digests used to fingerprint archive
//! payloads while they cross the transport. [`strong`] wraps the RustCrypto
//! SHA-1 and MD5 implementations behind a small [`StrongDigest`] trait, and
//! [`HashAccumulator`] combines both with a byte counter that only advances
//! while a caller has named the item currently being transferred.
//!
//! # Invariants
//!
//! - Digests depend only on the concatenated input, never on how callers
//!   chunk it.
//! - An inactive accumulator performs no hashing work.
//! - [`HashAccumulator::summary`] snapshots state without finalising the
//!   running digests.
//!
//! # Examples
//!
//! ```
//! use checksums::{HashAccumulator, strong::Sha1};
//!
//! let mut hashes = HashAccumulator::new();
//! hashes.observe(b"not hashed");
//! hashes.activate("x");
//! hashes.observe(b"AAA");
//! hashes.observe(b"BBBC");
//!
//! let summary = hashes.summary();
//! assert_eq!(summary.byte_count(), 7);
//! assert_eq!(summary.sha1(), &Sha1::digest(b"AAABBBC"));
//! ```

mod accumulator;
pub mod strong;

pub use accumulator::{HashAccumulator, HashSummary};
pub use strong::StrongDigest;
