//! `backup [--compress none|gzip] [--level 0-9] PATH...`

use std::ffi::OsString;
use std::fs;
use std::io::{Read, Write};
use std::os::unix::fs::FileTypeExt;
use std::path::{Path, PathBuf};

use archive::{ArchiveSession, SessionHost};
use clap::builder::OsStringValueParser;
use clap::{Arg, ArgAction, Command, value_parser};

use super::{compress_arg, exit_code, log_member};
use crate::error::DriverError;
use crate::invocation::Operation;

fn command() -> Command {
    Command::new("backup")
        .no_binary_name(true)
        .arg(compress_arg())
        .arg(
            Arg::new("level")
                .long("level")
                .value_name("0-9")
                .help("gzip compression level.")
                .num_args(1)
                .action(ArgAction::Set)
                .value_parser(value_parser!(u8).range(0..=9)),
        )
        .arg(
            Arg::new("paths")
                .value_name("PATH")
                .required(true)
                .num_args(1..)
                .action(ArgAction::Append)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Archives each PATH, and everything below it, to the session.
pub fn run_backup<S: Read + Write>(args: &[OsString], host: &mut SessionHost<S>) -> i32 {
    exit_code(Operation::Backup, backup(args, host))
}

fn backup<S: Read + Write>(args: &[OsString], host: &mut SessionHost<S>) -> Result<(), DriverError> {
    let matches = command().try_get_matches_from(args)?;
    let compression = matches.get_one::<String>("compress").map(String::as_str);
    let mode = matches
        .get_one::<u8>("level")
        .map_or_else(|| "w".to_owned(), |level| format!("w{level}"));
    let roots: Vec<PathBuf> = matches
        .get_many::<OsString>("paths")
        .into_iter()
        .flatten()
        .map(PathBuf::from)
        .collect();

    let session = host.create_session(compression, &mode)?;
    let mut members = 0_usize;
    for root in &roots {
        members += match archive_name(root)? {
            Some(name) => append_tree(session, root, &name)?,
            None => append_children(session, root, Path::new(""))?,
        };
    }

    let summary = session.hash_summary();
    tracing::info!(
        target: "bu::backup",
        members,
        bytes = summary.byte_count(),
        sha1 = %summary.sha1_hex(),
        md5 = %summary.md5_hex(),
        "backup complete"
    );
    Ok(())
}

/// Name a backup root is archived under: its final component.
///
/// Roots such as `.` or `..` are canonicalized first. The filesystem root has
/// no name, so `None` is returned and its children go to the top level.
fn archive_name(root: &Path) -> Result<Option<PathBuf>, DriverError> {
    if let Some(name) = root.file_name() {
        return Ok(Some(PathBuf::from(name)));
    }
    let canonical = fs::canonicalize(root).map_err(|error| DriverError::path(root, error))?;
    Ok(canonical.file_name().map(PathBuf::from))
}

/// Appends `path` as `name`, then its children in sorted order.
///
/// Sockets cannot be stored in a tar archive and are skipped.
fn append_tree<S: Read + Write>(
    session: &mut ArchiveSession<S>,
    path: &Path,
    name: &Path,
) -> Result<usize, DriverError> {
    let metadata = fs::symlink_metadata(path).map_err(|error| DriverError::path(path, error))?;
    if metadata.file_type().is_socket() {
        tracing::warn!(
            target: "bu::backup",
            path = %path.display(),
            "skipping socket"
        );
        return Ok(0);
    }

    let item = name.to_string_lossy().into_owned();
    session.set_current_item(item.as_str());
    let appended = session.append_path(path, name);
    let summary = session.hash_summary();
    session.clear_current_item();
    appended?;
    log_member("member archived", &item, &summary);

    let mut count = 1;
    if metadata.is_dir() {
        count += append_children(session, path, name)?;
    }
    Ok(count)
}

fn append_children<S: Read + Write>(
    session: &mut ArchiveSession<S>,
    path: &Path,
    name: &Path,
) -> Result<usize, DriverError> {
    let mut children = fs::read_dir(path)
        .and_then(|entries| {
            entries
                .map(|entry| entry.map(|entry| entry.file_name()))
                .collect::<Result<Vec<_>, _>>()
        })
        .map_err(|error| DriverError::path(path, error))?;
    children.sort();

    let mut count = 0;
    for child in children {
        count += append_tree(session, &path.join(&child), &name.join(&child))?;
    }
    Ok(count)
}
