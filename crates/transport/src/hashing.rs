//! crates/transport/src/hashing.rs
//!
//! The hashing decorator placed between the tar engine and the backend.
//!
//! Every byte read from or written to the backend is fed into a shared
//! [`HashAccumulator`] while an item name is set. The accumulator lives behind
//! a [`HashHandle`] so the session can name items and take summaries while the
//! tar engine owns the stream.

use std::cell::RefCell;
use std::io::{self, Read, Write};
use std::rc::Rc;

use checksums::{HashAccumulator, HashSummary};

use crate::ops::StreamOps;
use crate::retry::write_with_retry;

/// Shared, single-threaded handle to a session's [`HashAccumulator`].
#[derive(Clone, Debug, Default)]
pub struct HashHandle {
    state: Rc<RefCell<HashAccumulator>>,
}

impl HashHandle {
    /// Creates a handle to a zeroed, inactive accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names the current item and activates hashing.
    pub fn set_item(&self, name: impl Into<String>) {
        self.state.borrow_mut().activate(name);
    }

    /// Clears the current item name; running digests are kept.
    pub fn clear_item(&self) -> Option<String> {
        self.state.borrow_mut().deactivate()
    }

    /// Reports whether transferred bytes are being hashed.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state.borrow().is_active()
    }

    /// Bytes hashed since the session started.
    #[must_use]
    pub fn byte_count(&self) -> u64 {
        self.state.borrow().byte_count()
    }

    /// Snapshot of the running digests.
    #[must_use]
    pub fn summary(&self) -> HashSummary {
        self.state.borrow().summary()
    }

    /// Feeds `data` into the accumulator when active.
    pub fn observe(&self, data: &[u8]) -> bool {
        self.state.borrow_mut().observe(data)
    }
}

/// Stream decorator that hashes every transferred byte.
#[derive(Debug)]
pub struct HashingStream<T> {
    inner: T,
    hashes: HashHandle,
}

impl<T> HashingStream<T> {
    /// Wraps `inner`, hashing into `hashes`.
    pub fn new(inner: T, hashes: HashHandle) -> Self {
        Self { inner, hashes }
    }

    /// Returns the handle shared with the owning session.
    pub const fn hashes(&self) -> &HashHandle {
        &self.hashes
    }

    /// Borrows the wrapped stream.
    pub const fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Unwraps the stream.
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + Write> StreamOps for HashingStream<T> {
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf).inspect_err(|err| {
            tracing::warn!(
                target: "bu::io",
                os_error = err.raw_os_error(),
                "transport read failed: {err}"
            );
        })?;
        if n > 0 {
            self.hashes.observe(&buf[..n]);
        }
        Ok(n)
    }

    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<usize> {
        // The full request is hashed before delivery is known.
        self.hashes.observe(buf);
        write_with_retry(&mut self.inner, buf)
    }
}

impl<T: Read + Write> Read for HashingStream<T> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.read_bytes(buf)
    }
}

impl<T: Read + Write> Write for HashingStream<T> {
    /// Delivers the whole buffer or fails.
    ///
    /// A short delivery becomes [`io::ErrorKind::WriteZero`]; returning the
    /// short count would make `write_all` resubmit, and hash, the tail again.
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        match self.write_bytes(buf) {
            Ok(n) if n == buf.len() => Ok(n),
            Ok(n) => Err(io::Error::new(
                io::ErrorKind::WriteZero,
                format!("transport accepted {n} of {} bytes", buf.len()),
            )),
            // `write_all` retries Interrupted, which would hash the buffer twice.
            Err(err) if err.kind() == io::ErrorKind::Interrupted => Err(io::Error::other(err)),
            Err(err) => Err(err),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
