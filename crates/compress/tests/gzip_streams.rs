//! Gzip stream behaviour when bytes arrive in arbitrary pieces.

use std::io::{Cursor, Read, Write};

use compress::gzip::{CompressionLevel, GzipStream, compress_to_vec, decompress_to_vec};
use compress::{StreamDirection, StreamMode};
use proptest::prelude::*;

/// Reader that never yields more than `limit` bytes per call, like a socket.
struct Trickle<R> {
    inner: R,
    limit: usize,
}

impl<R: Read> Read for Trickle<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let len = buf.len().min(self.limit);
        self.inner.read(&mut buf[..len])
    }
}

impl<R> Write for Trickle<R> {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Ok(0)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn empty_stream_still_produces_valid_member() {
    let writer = GzipStream::open(Cursor::new(Vec::new()), &StreamMode::write());
    let compressed = writer.finish().expect("finish").into_inner();
    assert!(!compressed.is_empty());
    assert!(decompress_to_vec(&compressed).expect("decode").is_empty());
}

#[test]
fn stored_level_round_trips() {
    let mode: StreamMode = "w0".parse().expect("mode");
    assert_eq!(mode.level(), CompressionLevel::None);

    let payload = vec![b'z'; 4096];
    let mut writer = GzipStream::open(Cursor::new(Vec::new()), &mode);
    writer.write_all(&payload).expect("write");
    let compressed = writer.finish().expect("finish").into_inner();
    assert!(compressed.len() > payload.len());
    assert_eq!(decompress_to_vec(&compressed).expect("decode"), payload);
}

#[test]
fn truncated_stream_reports_error() {
    let compressed = compress_to_vec(&[7_u8; 1000], CompressionLevel::Default).expect("compress");
    let truncated = &compressed[..compressed.len() / 2];
    assert!(decompress_to_vec(truncated).is_err());
}

#[test]
fn append_mode_compresses_like_write() {
    let mode: StreamMode = "a".parse().expect("mode");
    let mut writer = GzipStream::open(Cursor::new(Vec::new()), &mode);
    assert_eq!(writer.direction(), StreamDirection::Write);
    writer.write_all(b"appended").expect("write");
    let compressed = writer.finish().expect("finish").into_inner();
    assert_eq!(decompress_to_vec(&compressed).expect("decode"), b"appended");
}

proptest! {
    #[test]
    fn decoding_is_independent_of_transport_chunking(
        payload in proptest::collection::vec(any::<u8>(), 0..4096),
        limit in 1_usize..64,
        level in 0_u32..=9,
    ) {
        let level = CompressionLevel::from_numeric(level).expect("valid level");
        let compressed = compress_to_vec(&payload, level).expect("compress");

        let transport = Trickle { inner: Cursor::new(compressed), limit };
        let mut reader = GzipStream::open(transport, &StreamMode::read());
        let mut decoded = Vec::new();
        reader.read_to_end(&mut decoded).expect("decode");
        prop_assert_eq!(decoded, payload);
    }
}
