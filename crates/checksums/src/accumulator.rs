//! crates/checksums/src/accumulator.rs
//!
//! Running SHA-1/MD5 state scoped by the name of the archive item currently
//! crossing the transport.
//!
//! The accumulator is created zeroed once per archive session. Hashing starts
//! when a caller names the current item and covers every byte observed from
//! then on; digests and the byte counter are never reset mid-session. While no
//! item is named, [`HashAccumulator::observe`] returns immediately without
//! touching either digest.

use std::fmt;

use crate::strong::{Md5, Sha1, to_hex};

/// SHA-1 and MD5 digest state plus a byte counter, gated by an item name.
#[derive(Clone, Debug, Default)]
pub struct HashAccumulator {
    item: Option<String>,
    byte_count: u64,
    sha1: Sha1,
    md5: Md5,
}

impl HashAccumulator {
    /// Creates an inactive accumulator with fresh digest contexts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the item being transferred and activates hashing.
    ///
    /// Renaming an already active accumulator keeps the running digests.
    pub fn activate(&mut self, item: impl Into<String>) {
        self.item = Some(item.into());
    }

    /// Clears the current item name, returning it. Digest state is kept.
    pub fn deactivate(&mut self) -> Option<String> {
        self.item.take()
    }

    /// Reports whether bytes are currently being hashed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.item.is_some()
    }

    /// Returns the number of bytes hashed so far.
    #[must_use]
    pub const fn byte_count(&self) -> u64 {
        self.byte_count
    }

    /// Feeds `data` into both digests when active.
    ///
    /// Returns `true` when the bytes were hashed.
    pub fn observe(&mut self, data: &[u8]) -> bool {
        if self.item.is_none() {
            return false;
        }
        self.sha1.update(data);
        self.md5.update(data);
        self.byte_count = self.byte_count.saturating_add(data.len() as u64);
        true
    }

    /// Snapshots the running state without disturbing it.
    #[must_use]
    pub fn summary(&self) -> HashSummary {
        HashSummary {
            item: self.item.clone(),
            byte_count: self.byte_count,
            sha1: self.sha1.clone().finalize(),
            md5: self.md5.clone().finalize(),
        }
    }
}

/// Point-in-time view of a [`HashAccumulator`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashSummary {
    item: Option<String>,
    byte_count: u64,
    sha1: [u8; 20],
    md5: [u8; 16],
}

impl HashSummary {
    /// Item name active when the snapshot was taken.
    #[must_use]
    pub fn item(&self) -> Option<&str> {
        self.item.as_deref()
    }

    /// Number of bytes hashed.
    #[must_use]
    pub const fn byte_count(&self) -> u64 {
        self.byte_count
    }

    /// SHA-1 digest of the hashed bytes.
    #[must_use]
    pub const fn sha1(&self) -> &[u8; 20] {
        &self.sha1
    }

    /// MD5 digest of the hashed bytes.
    #[must_use]
    pub const fn md5(&self) -> &[u8; 16] {
        &self.md5
    }

    /// Lowercase hexadecimal SHA-1 digest.
    #[must_use]
    pub fn sha1_hex(&self) -> String {
        to_hex(&self.sha1)
    }

    /// Lowercase hexadecimal MD5 digest.
    #[must_use]
    pub fn md5_hex(&self) -> String {
        to_hex(&self.md5)
    }
}

impl fmt::Display for HashSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} bytes sha1={} md5={}",
            self.item.as_deref().unwrap_or("-"),
            self.byte_count,
            self.sha1_hex(),
            self.md5_hex()
        )
    }
}
