//! Strong digests computed over archive payloads.
//!
//! Both algorithms are streaming: callers feed arbitrary chunks through
//! [`StrongDigest::update`] and the result only depends on the concatenated
//! input, never on the chunk boundaries.

use std::fmt;

mod md5;
mod sha1;

pub use self::md5::Md5;
pub use self::sha1::Sha1;

/// Common interface shared by the streaming digest implementations.
pub trait StrongDigest: Sized {
    /// Fixed-size digest output.
    type Digest: AsRef<[u8]> + Copy + Eq + fmt::Debug;

    /// Length of [`Self::Digest`] in bytes.
    const DIGEST_LEN: usize;

    /// Creates a hasher with an empty state.
    fn new() -> Self;

    /// Feeds additional bytes into the digest state.
    fn update(&mut self, data: &[u8]);

    /// Consumes the hasher and returns the digest.
    fn finalize(self) -> Self::Digest;

    /// Computes the digest of `data` in one shot.
    fn digest(data: &[u8]) -> Self::Digest {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

/// Renders `bytes` as lowercase hexadecimal.
#[must_use]
pub fn to_hex(bytes: &[u8]) -> String {
    use std::fmt::Write as _;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        // Writing into a String cannot fail.
        let _ = write!(&mut out, "{byte:02x}");
    }
    out
}
