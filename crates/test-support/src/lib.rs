#![deny(unsafe_code)]
#![deny(missing_docs)]

//! In-memory transports shared by the workspace's tests.
//!
//! [`MemoryTransport`] behaves like a perfectly cooperative socket.
//! [`ScriptedTransport`] replays a script of write outcomes so tests can
//! exercise short writes, zero-progress writes and hard failures.

use std::collections::VecDeque;
use std::io::{self, Cursor, Read, Write};
use std::path::Path;

use tempfile::TempDir;

/// Transport that reads from a fixed buffer and records every written byte.
#[derive(Clone, Debug, Default)]
pub struct MemoryTransport {
    reader: Cursor<Vec<u8>>,
    written: Vec<u8>,
}

impl MemoryTransport {
    /// Creates a transport whose reads yield `input`.
    pub fn new(input: &[u8]) -> Self {
        Self {
            reader: Cursor::new(input.to_vec()),
            written: Vec::new(),
        }
    }

    /// Bytes written so far.
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Consumes the transport and returns the written bytes.
    pub fn into_written(self) -> Vec<u8> {
        self.written
    }
}

impl Read for MemoryTransport {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl Write for MemoryTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.written.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Outcome of one scripted `write` call.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum WriteStep {
    /// Accept at most this many bytes.
    Accept(usize),
    /// Report zero bytes written.
    Zero,
    /// Fail with an error of this kind.
    Fail(io::ErrorKind),
}

/// Transport that follows a script of write outcomes.
///
/// Once the script is exhausted every write is accepted in full.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    steps: VecDeque<WriteStep>,
    delivered: Vec<u8>,
    write_calls: usize,
    read_calls: usize,
    flush_failure: Option<io::ErrorKind>,
    read_failure: Option<io::ErrorKind>,
}

impl ScriptedTransport {
    /// Creates a transport that replays `steps` in order.
    pub fn new(steps: impl IntoIterator<Item = WriteStep>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Makes every `flush` fail with `kind`.
    #[must_use]
    pub fn fail_flush(mut self, kind: io::ErrorKind) -> Self {
        self.flush_failure = Some(kind);
        self
    }

    /// Makes every `read` fail with `kind`.
    #[must_use]
    pub fn fail_read(mut self, kind: io::ErrorKind) -> Self {
        self.read_failure = Some(kind);
        self
    }

    /// Bytes the transport accepted.
    pub fn delivered(&self) -> &[u8] {
        &self.delivered
    }

    /// Number of `write` calls observed.
    pub const fn write_calls(&self) -> usize {
        self.write_calls
    }

    /// Number of `read` calls observed.
    pub const fn read_calls(&self) -> usize {
        self.read_calls
    }
}

impl Read for ScriptedTransport {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        self.read_calls += 1;
        match self.read_failure {
            Some(kind) => Err(io::Error::new(kind, "scripted read failure")),
            None => Ok(0),
        }
    }
}

impl Write for ScriptedTransport {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_calls += 1;
        let accepted = match self.steps.pop_front() {
            Some(WriteStep::Accept(limit)) => buf.len().min(limit),
            Some(WriteStep::Zero) => 0,
            Some(WriteStep::Fail(kind)) => {
                return Err(io::Error::new(kind, "scripted write failure"));
            }
            None => buf.len(),
        };
        self.delivered.extend_from_slice(&buf[..accepted]);
        Ok(accepted)
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.flush_failure {
            Some(kind) => Err(io::Error::new(kind, "scripted flush failure")),
            None => Ok(()),
        }
    }
}

/// Creates a temporary directory populated with `files` (relative path, contents).
///
/// Parent directories are created as needed.
pub fn populated_dir(files: &[(&str, &[u8])]) -> io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    for (relative, contents) in files {
        write_file(dir.path(), relative, contents)?;
    }
    Ok(dir)
}

fn write_file(root: &Path, relative: &str, contents: &[u8]) -> io::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_transport_replays_steps_then_accepts() {
        let mut transport = ScriptedTransport::new([
            WriteStep::Accept(2),
            WriteStep::Zero,
            WriteStep::Fail(io::ErrorKind::BrokenPipe),
        ]);
        assert_eq!(transport.write(b"abcd").unwrap(), 2);
        assert_eq!(transport.write(b"cd").unwrap(), 0);
        let err = transport.write(b"cd").unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(transport.write(b"cd").unwrap(), 2);
        assert_eq!(transport.delivered(), b"abcd");
        assert_eq!(transport.write_calls(), 4);
    }

    #[test]
    fn memory_transport_reads_input_and_records_output() {
        let mut transport = MemoryTransport::new(b"in");
        let mut buf = [0_u8; 4];
        assert_eq!(transport.read(&mut buf).unwrap(), 2);
        transport.write_all(b"out").unwrap();
        assert_eq!(transport.written(), b"out");
    }

    #[test]
    fn populated_dir_creates_nested_files() {
        let dir = populated_dir(&[("a/b/c.txt", b"nested")]).unwrap();
        assert_eq!(std::fs::read(dir.path().join("a/b/c.txt")).unwrap(), b"nested");
    }
}
