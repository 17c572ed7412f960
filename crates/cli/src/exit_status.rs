//! crates/cli/src/exit_status.rs
//!
//! Exit codes and the status file that carries them to the parent process.
//!
//! The parent cannot observe the exit code directly once the socket is
//! closed, so the final code is also written to a fixed path as decimal text
//! followed by a newline. The file is removed and recreated on every run so
//! no stale content survives.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// Exit codes produced by the tool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ExitCode {
    /// The operation completed.
    Ok = 0,
    /// Bad arguments, session failure or a failed operation.
    Failure = 1,
}

impl ExitCode {
    /// Returns the numeric code.
    #[must_use]
    pub const fn as_i32(self) -> i32 {
        self as i32
    }

    /// Returns a short description of the code.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Ok => "success",
            Self::Failure => "failure",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code.as_i32()
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Writes the status file and terminates the process.
#[derive(Clone, Debug)]
pub struct ExitReporter {
    path: PathBuf,
}

impl ExitReporter {
    /// Creates a reporter writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Status file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Replaces the status file with `"{code}\n"`, mode 0644.
    pub fn record(&self, code: i32) -> io::Result<()> {
        if let Err(error) = fs::remove_file(&self.path)
            && error.kind() != io::ErrorKind::NotFound
        {
            tracing::debug!(
                target: "bu::exit",
                path = %self.path.display(),
                "cannot remove old status file: {error}"
            );
        }

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .mode(0o644)
            .open(&self.path)?;
        file.write_all(format!("{code}\n").as_bytes())
    }

    /// Records `code` and exits the process with it.
    ///
    /// A failure to write the status file is logged; the process still exits
    /// with `code`.
    pub fn exit(&self, code: i32) -> ! {
        if let Err(error) = self.record(code) {
            tracing::error!(
                target: "bu::exit",
                path = %self.path.display(),
                os_error = error.raw_os_error(),
                "cannot write status file: {error}"
            );
        }
        std::process::exit(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn codes_map_to_integers() {
        assert_eq!(ExitCode::Ok.as_i32(), 0);
        assert_eq!(i32::from(ExitCode::Failure), 1);
        assert_eq!(ExitCode::Failure.to_string(), "failure");
    }

    #[test]
    fn record_writes_code_and_newline() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = ExitReporter::new(dir.path().join("burc"));
        reporter.record(0).unwrap();
        assert_eq!(fs::read_to_string(reporter.path()).unwrap(), "0\n");
    }

    #[test]
    fn record_replaces_stale_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("burc");
        fs::write(&path, "stale status from an earlier, longer run\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        let reporter = ExitReporter::new(&path);
        reporter.record(1).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n");
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode & !0o644, 0);
    }

    #[test]
    fn negative_codes_are_written_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = ExitReporter::new(dir.path().join("burc"));
        reporter.record(-1).unwrap();
        assert_eq!(fs::read_to_string(reporter.path()).unwrap(), "-1\n");
    }

    #[test]
    fn unwritable_location_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let reporter = ExitReporter::new(dir.path().join("missing").join("burc"));
        assert!(reporter.record(0).is_err());
    }
}
