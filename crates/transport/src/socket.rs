//! crates/transport/src/socket.rs
//!
//! Ownership of the socket descriptor the parent process hands over on the
//! command line.

use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd, FromRawFd, OwnedFd, RawFd};

/// An owned, already-connected socket descriptor.
///
/// The descriptor is closed when the value is dropped, so it is released
/// exactly once however the run ends.
#[derive(Debug)]
pub struct SocketDescriptor {
    file: File,
}

impl SocketDescriptor {
    /// Adopts a descriptor number inherited from the parent process.
    ///
    /// Negative numbers are rejected with [`io::ErrorKind::InvalidInput`];
    /// numbers that do not name an open descriptor fail with the `EBADF`
    /// reported by `fcntl(F_GETFD)`.
    #[allow(unsafe_code)]
    pub fn from_raw(fd: RawFd) -> io::Result<Self> {
        if fd < 0 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("socket descriptor {fd} is negative"),
            ));
        }

        // SAFETY: the borrow lives only for the probe and `fd` is non-negative.
        let borrowed = unsafe { BorrowedFd::borrow_raw(fd) };
        rustix::io::fcntl_getfd(borrowed)?;

        // SAFETY: the probe confirmed `fd` is open, and the caller hands over
        // sole ownership of the inherited descriptor.
        let owned = unsafe { OwnedFd::from_raw_fd(fd) };
        Ok(Self::from_owned(owned))
    }

    /// Wraps a descriptor the caller already owns.
    #[must_use]
    pub fn from_owned(fd: OwnedFd) -> Self {
        Self {
            file: File::from(fd),
        }
    }
}

impl AsFd for SocketDescriptor {
    fn as_fd(&self) -> BorrowedFd<'_> {
        self.file.as_fd()
    }
}

impl AsRawFd for SocketDescriptor {
    fn as_raw_fd(&self) -> RawFd {
        self.file.as_raw_fd()
    }
}

impl Read for SocketDescriptor {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl Write for SocketDescriptor {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()
    }
}
