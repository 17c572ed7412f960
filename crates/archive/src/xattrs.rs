//! Extended attributes carried as `SCHILY.xattr.*` pax records.

use std::io;
use std::path::Path;

/// Prefix GNU tar and star use for extended attribute pax keys.
pub const PAX_XATTR_PREFIX: &str = "SCHILY.xattr.";

/// Reads every extended attribute of `path` without following symlinks.
///
/// Security labels are included. Filesystems without xattr support yield an
/// empty list.
pub fn collect(path: &Path) -> io::Result<Vec<(String, Vec<u8>)>> {
    let names = match xattr::list(path) {
        Ok(names) => names,
        Err(error) if is_unsupported(&error) => {
            tracing::debug!(
                target: "bu::xattr",
                path = %path.display(),
                "extended attributes unsupported: {error}"
            );
            return Ok(Vec::new());
        }
        Err(error) => return Err(error),
    };

    let mut records = Vec::new();
    for name in names {
        if let Some(value) = xattr::get(path, &name)? {
            records.push((
                format!("{PAX_XATTR_PREFIX}{}", name.to_string_lossy()),
                value,
            ));
        }
    }
    records.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(records)
}

fn is_unsupported(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::Unsupported
        || error.raw_os_error() == Some(rustix::io::Errno::OPNOTSUPP.raw_os_error())
}
