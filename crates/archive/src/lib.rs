#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `archive` pairs the tar engine with the hashing transport. An
//! [`ArchiveSession`] is created once per run from a compression selector and
//! a transfer mode; it then serves either as a tar writer (backup) or a tar
//! reader (restore). [`SessionHost`] owns the socket and enforces that only
//! one session ever exists.
//!
//! # Design
//!
//! Writers use GNU headers with long-name extensions and
//! [`tar::HeaderMode::Complete`], archive symlinks as links, and emit each
//! member's extended attributes (security labels included) as
//! `SCHILY.xattr.*` pax records. Readers restore those attributes along with
//! permissions and modification times.
//!
//! # Errors
//!
//! [`SessionError`] covers invalid selectors and modes, repeated creation,
//! use after close, use against the session's direction and archive I/O.
//!
//! # Examples
//!
//! ```
//! use std::io::Cursor;
//! use archive::{ArchiveMode, SessionHost};
//!
//! let mut host = SessionHost::new(Cursor::new(Vec::new()));
//! let session = host.create_session(Some("gzip"), "w9").unwrap();
//! assert_eq!(session.mode(), ArchiveMode::Write);
//! assert!(host.create_session(None, "w").is_err());
//! host.close().unwrap();
//! ```

mod error;
mod host;
mod session;
pub mod xattrs;

pub use error::SessionError;
pub use host::SessionHost;
pub use session::{ArchiveMode, ArchiveSession, ArchiveStream};
