#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the process-level front end of `bu`. The parent process invokes
//! the tool as `bu <socket_fd> <operation> [args...]`, where `operation` is
//! `backup` or `restore`. The tool adopts the socket, runs the operation over
//! a single archive session, closes the socket, and reports the exit code
//! both as the process status and through a status file.
//!
//! # Design
//!
//! [`run`] walks the run through its states:
//!
//! ```text
//! Start -> ArgsValidated -> SessionCreated -> OperationRunning
//!       -> OperationComplete | OperationFailed -> SocketClosed -> (caller) StatusReported
//! ```
//!
//! Invalid arguments short-circuit to a non-zero code before the socket is
//! touched. The binary hands the returned code to
//! [`ExitReporter::exit`], which is the last action on every path.
//!
//! # Invariants
//!
//! - At most one archive session is created per run.
//! - The socket is closed exactly once, before the status is reported, and is
//!   followed by the configured pause.
//! - A failure to finish the session at close turns a successful run into
//!   exit code 1.
//!
//! # Errors
//!
//! Argument problems are [`CliError`] values; driver failures are
//! [`DriverError`] values. Both are logged and mapped to [`ExitCode::Failure`].

mod config;
mod drivers;
mod error;
mod exit_status;
mod invocation;
mod platform;

use std::ffi::OsString;
use std::io::{Read, Write};
use std::thread;
use std::time::Duration;

use archive::SessionHost;
use transport::SocketDescriptor;

pub use config::{
    CLOSE_DELAY_VAR, DEFAULT_CLOSE_DELAY, DEFAULT_STATUS_PATH, LOG_FILE_VAR, LOG_FILTER_VAR,
    RuntimeConfig, STATUS_FILE_VAR,
};
pub use drivers::{dispatch, run_backup, run_restore};
pub use error::{CliError, DriverError};
pub use exit_status::{ExitCode, ExitReporter};
pub use invocation::{Invocation, Operation};
pub use platform::{
    DEFAULT_FILE_CONTEXTS, DEFAULT_VOLUME_TABLE, PlatformSetup, SystemPlatform, Volume,
    parse_volume_table,
};

/// Runs one invocation and returns its exit code.
///
/// `args` is the full argument vector, program name first. The status file
/// is not written here; pass the result to [`ExitReporter::exit`].
pub fn run<I, T, P>(args: I, config: &RuntimeConfig, platform: &mut P) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
    P: PlatformSetup + ?Sized,
{
    let args: Vec<OsString> = args.into_iter().map(Into::into).collect();
    tracing::info!(target: "bu", "bu: invoked with {} args", args.len());

    let invocation = match Invocation::parse(args) {
        Ok(invocation) => invocation,
        Err(error) => {
            tracing::error!(target: "bu", "{error}");
            return ExitCode::Failure.as_i32();
        }
    };

    platform.initialize();

    let socket = match SocketDescriptor::from_raw(invocation.socket_fd()) {
        Ok(socket) => socket,
        Err(source) => {
            let error = CliError::Socket {
                fd: invocation.socket_fd(),
                source,
            };
            tracing::error!(target: "bu", "{error}");
            return ExitCode::Failure.as_i32();
        }
    };

    execute(
        invocation.operation(),
        invocation.operation_args(),
        SessionHost::new(socket),
        config.close_delay(),
    )
}

/// Runs `operation` over `host`, closes it, and pauses for `close_delay`.
pub fn execute<S: Read + Write>(
    operation: Operation,
    args: &[OsString],
    mut host: SessionHost<S>,
    close_delay: Duration,
) -> i32 {
    let mut code = dispatch(operation, args, &mut host);

    if let Err(error) = host.close() {
        tracing::error!(
            target: "bu::session",
            os_error = error.raw_os_error(),
            "closing the archive stream failed: {error}"
        );
        if code == ExitCode::Ok.as_i32() {
            code = ExitCode::Failure.as_i32();
        }
    }

    if !close_delay.is_zero() {
        thread::sleep(close_delay);
    }
    tracing::info!(target: "bu", code, "bu exiting");
    code
}
