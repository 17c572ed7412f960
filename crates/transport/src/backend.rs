//! The two ways archive bytes can travel over the socket.

use std::fmt;
use std::io::{self, Read, Write};

use compress::gzip::GzipStream;
use compress::{CompressionAlgorithm, StreamMode};

/// A raw socket or a gzip stream wrapped around it.
///
/// In the compressed variant the socket is owned by the gzip stream and is
/// only reachable through it.
pub enum TransportBackend<S: Write> {
    /// Bytes go to and from the socket unchanged.
    Raw(S),
    /// Bytes are compressed on write and decompressed on read.
    Compressed(GzipStream<S>),
}

impl<S: Read + Write> TransportBackend<S> {
    /// Binds `inner` to the backend selected by `algorithm`.
    ///
    /// The mode's direction and level only matter for the compressed variant.
    pub fn open(inner: S, algorithm: CompressionAlgorithm, mode: &StreamMode) -> Self {
        match algorithm {
            CompressionAlgorithm::None => Self::Raw(inner),
            CompressionAlgorithm::Gzip => Self::Compressed(GzipStream::open(inner, mode)),
        }
    }

    /// Returns the compression applied by this backend.
    #[must_use]
    pub const fn algorithm(&self) -> CompressionAlgorithm {
        match self {
            Self::Raw(_) => CompressionAlgorithm::None,
            Self::Compressed(_) => CompressionAlgorithm::Gzip,
        }
    }

    /// Borrows the underlying socket.
    #[must_use]
    pub fn get_ref(&self) -> &S {
        match self {
            Self::Raw(inner) => inner,
            Self::Compressed(stream) => stream.get_ref(),
        }
    }

    /// Flushes pending output (the gzip trailer included) and releases the
    /// socket.
    pub fn finish(self) -> io::Result<S> {
        match self {
            Self::Raw(mut inner) => {
                inner.flush()?;
                Ok(inner)
            }
            Self::Compressed(stream) => stream.finish(),
        }
    }
}

impl<S: Read + Write> Read for TransportBackend<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::Raw(inner) => inner.read(buf),
            Self::Compressed(stream) => stream.read(buf),
        }
    }
}

impl<S: Read + Write> Write for TransportBackend<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Raw(inner) => inner.write(buf),
            Self::Compressed(stream) => stream.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Raw(inner) => inner.flush(),
            Self::Compressed(stream) => stream.flush(),
        }
    }
}

impl<S: Write> fmt::Debug for TransportBackend<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(_) => f.write_str("TransportBackend::Raw"),
            Self::Compressed(_) => f.write_str("TransportBackend::Compressed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use compress::gzip::decompress_to_vec;
    use test_support::MemoryTransport;

    #[test]
    fn raw_backend_passes_bytes_through() {
        let mut backend = TransportBackend::open(
            MemoryTransport::new(b"incoming"),
            CompressionAlgorithm::None,
            &StreamMode::write(),
        );
        assert_eq!(backend.algorithm(), CompressionAlgorithm::None);
        backend.write_all(b"outgoing").unwrap();
        let mut buf = Vec::new();
        backend.read_to_end(&mut buf).unwrap();
        assert_eq!(buf, b"incoming");
        assert_eq!(backend.finish().unwrap().written(), b"outgoing");
    }

    #[test]
    fn compressed_backend_emits_gzip_on_finish() {
        let mut backend = TransportBackend::open(
            MemoryTransport::default(),
            CompressionAlgorithm::Gzip,
            &StreamMode::write(),
        );
        assert_eq!(backend.algorithm(), CompressionAlgorithm::Gzip);
        backend.write_all(b"payload").unwrap();
        let transport = backend.finish().unwrap();
        assert_eq!(decompress_to_vec(transport.written()).unwrap(), b"payload");
    }

    #[test]
    fn debug_names_the_variant() {
        let raw = TransportBackend::open(
            MemoryTransport::default(),
            CompressionAlgorithm::None,
            &StreamMode::write(),
        );
        assert_eq!(format!("{raw:?}"), "TransportBackend::Raw");

        let decoder = TransportBackend::open(
            MemoryTransport::default(),
            CompressionAlgorithm::Gzip,
            &StreamMode::read(),
        );
        assert_eq!(format!("{decoder:?}"), "TransportBackend::Compressed");
    }
}
