//! Digests depend only on the archive bytes, never on the channel.

use std::io::{Read, Write};

use checksums::HashSummary;
use checksums::strong::{Md5, Sha1};
use compress::gzip::{CompressionLevel, compress_to_vec};
use compress::{CompressionAlgorithm, StreamMode};
use proptest::prelude::*;
use test_support::MemoryTransport;
use transport::{HashHandle, HashingStream, StreamOps, TransportBackend};

fn write_through(algorithm: CompressionAlgorithm, writes: &[&[u8]]) -> (HashSummary, Vec<u8>) {
    let hashes = HashHandle::new();
    let backend = TransportBackend::open(MemoryTransport::default(), algorithm, &StreamMode::write());
    let mut stream = HashingStream::new(backend, hashes.clone());
    hashes.set_item("x");
    for chunk in writes {
        let written = stream.write_bytes(chunk).expect("write");
        assert_eq!(written, chunk.len());
    }
    let transport = stream.into_inner().finish().expect("finish backend");
    (hashes.summary(), transport.into_written())
}

#[test]
fn scenario_writes_hash_identically_with_and_without_gzip() {
    let writes: [&[u8]; 3] = [b"AAA", b"BBB", b"C"];
    let (gzip, compressed) = write_through(CompressionAlgorithm::Gzip, &writes);
    let (none, raw) = write_through(CompressionAlgorithm::None, &writes);

    assert_eq!(gzip.byte_count(), 7);
    assert_eq!(gzip.sha1(), &Sha1::digest(b"AAABBBC"));
    assert_eq!(gzip.md5(), &Md5::digest(b"AAABBBC"));
    assert_eq!(gzip, none);
    assert_eq!(raw, b"AAABBBC");
    assert_ne!(compressed, raw);
}

#[test]
fn hashing_starts_when_an_item_is_named() {
    let hashes = HashHandle::new();
    let backend = TransportBackend::open(
        MemoryTransport::default(),
        CompressionAlgorithm::None,
        &StreamMode::write(),
    );
    let mut stream = HashingStream::new(backend, hashes.clone());

    stream.write_all(b"preamble").unwrap();
    hashes.set_item("member");
    stream.write_all(b"body").unwrap();
    assert_eq!(hashes.clear_item().as_deref(), Some("member"));
    stream.write_all(b"padding").unwrap();

    let summary = hashes.summary();
    assert_eq!(summary.item(), None);
    assert_eq!(summary.byte_count(), 4);
    assert_eq!(summary.sha1(), &Sha1::digest(b"body"));
}

proptest! {
    #[test]
    fn reads_hash_the_decompressed_bytes(
        payload in proptest::collection::vec(any::<u8>(), 0..4096),
        chunk in 1_usize..512,
    ) {
        let compressed = compress_to_vec(&payload, CompressionLevel::Default).unwrap();
        let mut digests = Vec::new();
        for (algorithm, wire) in [
            (CompressionAlgorithm::Gzip, compressed.clone()),
            (CompressionAlgorithm::None, payload.clone()),
        ] {
            let hashes = HashHandle::new();
            hashes.set_item("restore");
            let backend = TransportBackend::open(
                MemoryTransport::new(&wire),
                algorithm,
                &StreamMode::read(),
            );
            let mut stream = HashingStream::new(backend, hashes.clone());
            let mut buf = vec![0_u8; chunk];
            let mut received = Vec::new();
            loop {
                let n = stream.read(&mut buf).unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
            }
            prop_assert_eq!(&received, &payload);
            prop_assert_eq!(hashes.byte_count(), payload.len() as u64);
            digests.push(hashes.summary());
        }
        prop_assert_eq!(&digests[0], &digests[1]);
    }

    #[test]
    fn write_count_matches_requested_lengths(
        writes in proptest::collection::vec(proptest::collection::vec(any::<u8>(), 0..256), 0..16),
    ) {
        let slices: Vec<&[u8]> = writes.iter().map(Vec::as_slice).collect();
        let (summary, _) = write_through(CompressionAlgorithm::Gzip, &slices);
        let total: usize = writes.iter().map(Vec::len).sum();
        prop_assert_eq!(summary.byte_count(), total as u64);
        prop_assert_eq!(summary.sha1(), &Sha1::digest(&writes.concat()));
    }
}
