//! The operations the tar engine invokes on its archive stream.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Open/close/read/write callbacks for an archive stream.
///
/// The stream is bound to an already-open socket, so opening a path is never
/// supported and closing a handle is a no-op; the socket is released when the
/// session host closes the session.
pub trait StreamOps {
    /// Always fails with [`io::ErrorKind::Unsupported`].
    fn open_path(&mut self, path: &Path, _options: &OpenOptions) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("archive stream cannot open {}", path.display()),
        ))
    }

    /// Always succeeds.
    fn close_handle(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Reads up to `buf.len()` bytes; `Ok(0)` signals end of stream.
    fn read_bytes(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Writes `buf`, returning how many bytes reached the transport.
    fn write_bytes(&mut self, buf: &[u8]) -> io::Result<usize>;
}
