//! `restore [--compress none|gzip] [DEST]`

use std::ffi::OsString;
use std::io::{Read, Write};
use std::path::PathBuf;

use archive::SessionHost;
use clap::builder::OsStringValueParser;
use clap::{Arg, ArgAction, Command};

use super::{compress_arg, exit_code, log_member};
use crate::error::DriverError;
use crate::invocation::Operation;

/// Destination used when none is given.
pub const DEFAULT_DESTINATION: &str = "/";

fn command() -> Command {
    Command::new("restore")
        .no_binary_name(true)
        .arg(compress_arg())
        .arg(
            Arg::new("dest")
                .value_name("DEST")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Extracts every archive entry read from the session under DEST.
pub fn run_restore<S: Read + Write>(args: &[OsString], host: &mut SessionHost<S>) -> i32 {
    exit_code(Operation::Restore, restore(args, host))
}

fn restore<S: Read + Write>(args: &[OsString], host: &mut SessionHost<S>) -> Result<(), DriverError> {
    let matches = command().try_get_matches_from(args)?;
    let compression = matches.get_one::<String>("compress").map(String::as_str);
    let dest = matches
        .get_one::<OsString>("dest")
        .map_or_else(|| PathBuf::from(DEFAULT_DESTINATION), PathBuf::from);

    let session = host.create_session(compression, "r")?;
    let hashes = session.hashes().clone();
    let archive = session.archive()?;
    archive.set_preserve_ownerships(rustix::process::geteuid().is_root());

    let mut members = 0_usize;
    for entry in archive.entries()? {
        let mut entry = entry?;
        let item = entry.path()?.to_string_lossy().into_owned();

        hashes.set_item(item.as_str());
        let unpacked = entry.unpack_in(&dest);
        let summary = hashes.summary();
        hashes.clear_item();

        if unpacked.map_err(|error| DriverError::path(dest.join(&item), error))? {
            members += 1;
            log_member("member restored", &item, &summary);
        } else {
            tracing::warn!(
                target: "bu::restore",
                item = %item,
                "skipping entry outside {}",
                dest.display()
            );
        }
    }

    let summary = hashes.summary();
    tracing::info!(
        target: "bu::restore",
        members,
        bytes = summary.byte_count(),
        sha1 = %summary.sha1_hex(),
        md5 = %summary.md5_hex(),
        "restore complete"
    );
    Ok(())
}
