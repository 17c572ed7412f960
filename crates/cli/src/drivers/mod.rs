//! Backup and restore drivers.
//!
//! Each driver parses its own arguments, creates the run's archive session
//! exactly once, moves archive members, and reports an exit code.

mod backup;
mod restore;

use std::ffi::OsString;
use std::io::{Read, Write};

use archive::SessionHost;
use checksums::HashSummary;
use clap::{Arg, ArgAction};

use crate::error::DriverError;
use crate::exit_status::ExitCode;
use crate::invocation::Operation;

pub use backup::run_backup;
pub use restore::run_restore;

/// Runs `operation` with its arguments against `host`.
pub fn dispatch<S: Read + Write>(
    operation: Operation,
    args: &[OsString],
    host: &mut SessionHost<S>,
) -> i32 {
    match operation {
        Operation::Backup => run_backup(args, host),
        Operation::Restore => run_restore(args, host),
    }
}

fn compress_arg() -> Arg {
    Arg::new("compress")
        .long("compress")
        .value_name("none|gzip")
        .help("Compression applied to the archive stream.")
        .num_args(1)
        .action(ArgAction::Set)
}

fn exit_code(operation: Operation, result: Result<(), DriverError>) -> i32 {
    match result {
        Ok(()) => ExitCode::Ok.as_i32(),
        Err(error) => {
            tracing::error!(target: "bu", operation = %operation, "{error}");
            ExitCode::Failure.as_i32()
        }
    }
}

fn log_member(message: &'static str, item: &str, summary: &HashSummary) {
    tracing::info!(
        target: "bu::member",
        item = %item,
        bytes = summary.byte_count(),
        sha1 = %summary.sha1_hex(),
        md5 = %summary.md5_hex(),
        "{message}"
    );
}
