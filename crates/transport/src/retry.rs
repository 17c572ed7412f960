//! Delivering a buffer to a transport that may accept it piecemeal.

use std::io::{self, Write};

/// Writes `buf` to `writer`, retrying on the unwritten tail.
///
/// Stops early when a write makes no progress and returns the bytes written
/// so far. A failing write is logged and its error returned immediately;
/// bytes already delivered by earlier calls are not reported in that case.
pub fn write_with_retry<W: Write + ?Sized>(writer: &mut W, buf: &[u8]) -> io::Result<usize> {
    let mut written = 0;
    while written < buf.len() {
        match writer.write(&buf[written..]) {
            Ok(0) => {
                tracing::debug!(
                    target: "bu::io",
                    written,
                    requested = buf.len(),
                    "transport write made no progress"
                );
                break;
            }
            Ok(n) => written += n,
            Err(err) => {
                tracing::warn!(
                    target: "bu::io",
                    os_error = err.raw_os_error(),
                    written,
                    requested = buf.len(),
                    "transport write failed: {err}"
                );
                return Err(err);
            }
        }
    }
    Ok(written)
}
