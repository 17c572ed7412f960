//! Whole runs over a real socket pair.

use std::io::{Read, Write};
use std::os::fd::IntoRawFd;
use std::os::unix::net::{UnixListener, UnixStream};
use std::path::Path;
use std::thread;
use std::time::Duration;

use cli::{PlatformSetup, RuntimeConfig, run};
use test_support::populated_dir;

#[derive(Default)]
struct CountingPlatform {
    calls: usize,
}

impl PlatformSetup for CountingPlatform {
    fn initialize(&mut self) {
        self.calls += 1;
    }
}

fn config() -> RuntimeConfig {
    RuntimeConfig::default().with_close_delay(Duration::ZERO)
}

fn run_backup(args: &[&str]) -> (i32, Vec<u8>) {
    let (ours, theirs) = UnixStream::pair().unwrap();
    let reader = thread::spawn(move || {
        let mut ours = ours;
        let mut bytes = Vec::new();
        ours.read_to_end(&mut bytes).unwrap();
        bytes
    });

    let fd = theirs.into_raw_fd().to_string();
    let mut argv = vec!["bu", fd.as_str(), "backup"];
    argv.extend_from_slice(args);
    let mut platform = CountingPlatform::default();
    let code = run(argv, &config(), &mut platform);
    assert_eq!(platform.calls, 1);
    (code, reader.join().unwrap())
}

fn run_restore(args: &[&str], archive: Vec<u8>) -> i32 {
    let (mut ours, theirs) = UnixStream::pair().unwrap();
    let writer = thread::spawn(move || {
        ours.write_all(&archive).unwrap();
    });

    let fd = theirs.into_raw_fd().to_string();
    let mut argv = vec!["bu", fd.as_str(), "restore"];
    argv.extend_from_slice(args);
    let code = run(argv, &config(), &mut CountingPlatform::default());
    writer.join().unwrap();
    code
}

fn member_names(bytes: &[u8]) -> Vec<String> {
    let mut archive = tar::Archive::new(bytes);
    archive
        .entries()
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            let path = entry.path().unwrap().display().to_string();
            path.trim_end_matches('/').to_owned()
        })
        .collect()
}

#[test]
fn backup_streams_sorted_tree_under_final_component() {
    let source = populated_dir(&[
        ("tree/b.txt", b"bee".as_slice()),
        ("tree/a/inner.txt", b"inner"),
    ])
    .unwrap();
    let root = source.path().join("tree");

    let (code, bytes) = run_backup(&[root.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(
        member_names(&bytes),
        ["tree", "tree/a", "tree/a/inner.txt", "tree/b.txt"]
    );
}

#[test]
fn gzip_backup_restores_into_destination() {
    let source = populated_dir(&[("data/file.txt", b"payload".as_slice())]).unwrap();
    let root = source.path().join("data");

    let (code, compressed) =
        run_backup(&["--compress", "gzip", "--level", "9", root.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(&compressed[..2], &[0x1f, 0x8b]);

    let dest = tempfile::tempdir().unwrap();
    let code = run_restore(
        &["--compress", "GZIP", dest.path().to_str().unwrap()],
        compressed,
    );
    assert_eq!(code, 0);
    assert_eq!(
        std::fs::read(dest.path().join("data/file.txt")).unwrap(),
        b"payload"
    );
}

#[test]
fn unknown_compression_fails_the_run() {
    let source = populated_dir(&[("f", b"x".as_slice())]).unwrap();
    let (code, bytes) = run_backup(&["--compress", "bzip2", source.path().to_str().unwrap()]);
    assert_eq!(code, 1);
    assert!(bytes.is_empty());
}

#[test]
fn sockets_in_tree_are_skipped() {
    let source = populated_dir(&[("tree/a.txt", b"kept".as_slice())]).unwrap();
    let root = source.path().join("tree");
    let _listener = UnixListener::bind(root.join("sock")).unwrap();

    let (code, bytes) = run_backup(&[root.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(member_names(&bytes), ["tree", "tree/a.txt"]);
}

#[test]
fn dot_dot_root_is_archived_under_its_canonical_name() {
    let source = populated_dir(&[("outer/inner/f.txt", b"x".as_slice())]).unwrap();
    let root = source.path().join("outer").join("inner").join("..");

    let (code, bytes) = run_backup(&[root.to_str().unwrap()]);
    assert_eq!(code, 0);
    assert_eq!(
        member_names(&bytes),
        ["outer", "outer/inner", "outer/inner/f.txt"]
    );
}

#[test]
fn missing_backup_path_fails_after_partial_archive() {
    let (code, _) = run_backup(&[Path::new("/nonexistent/bu-test-path").to_str().unwrap()]);
    assert_eq!(code, 1);
}

#[test]
fn argument_errors_skip_platform_setup() {
    let mut platform = CountingPlatform::default();
    assert_eq!(run(["bu", "3"], &config(), &mut platform), 1);
    assert_eq!(run(["bu", "x", "backup"], &config(), &mut platform), 1);
    assert_eq!(run(["bu", "3", "list"], &config(), &mut platform), 1);
    assert_eq!(platform.calls, 0);
}

#[test]
fn unopened_descriptor_fails_after_platform_setup() {
    let mut platform = CountingPlatform::default();
    assert_eq!(run(["bu", "1000000", "restore"], &config(), &mut platform), 1);
    assert_eq!(platform.calls, 1);
}
