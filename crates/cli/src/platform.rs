//! Best-effort platform preparation performed once before any archive I/O.
//!
//! The system implementation checks that security-label file contexts are
//! available and loads the storage volume table. Neither is required for the
//! transfer itself: missing or unreadable files are logged and ignored.

use std::fs;
use std::path::PathBuf;

/// Default location of the security-label file contexts.
pub const DEFAULT_FILE_CONTEXTS: &str = "/file_contexts";

/// Default location of the storage volume table.
pub const DEFAULT_VOLUME_TABLE: &str = "/etc/recovery.fstab";

/// One-time platform preparation.
pub trait PlatformSetup {
    /// Prepares the platform; never fails.
    fn initialize(&mut self);
}

/// One entry of the volume table.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Volume {
    device: String,
    mount_point: String,
    fs_type: String,
    options: String,
}

impl Volume {
    /// Block device or source.
    pub fn device(&self) -> &str {
        &self.device
    }

    /// Mount point.
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    /// Filesystem type.
    pub fn fs_type(&self) -> &str {
        &self.fs_type
    }

    /// Mount options; empty when the line has none.
    pub fn options(&self) -> &str {
        &self.options
    }
}

/// Parses fstab-style text: `device mount_point fs_type [options ...]`.
///
/// Blank lines and `#` comments are skipped, as are lines with fewer than
/// three fields.
pub fn parse_volume_table(text: &str) -> Vec<Volume> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut fields = line.split_whitespace();
            let device = fields.next()?;
            let mount_point = fields.next()?;
            let fs_type = fields.next()?;
            Some(Volume {
                device: device.to_owned(),
                mount_point: mount_point.to_owned(),
                fs_type: fs_type.to_owned(),
                options: fields.next().unwrap_or_default().to_owned(),
            })
        })
        .collect()
}

/// Platform setup reading the real filesystem.
#[derive(Clone, Debug)]
pub struct SystemPlatform {
    file_contexts: PathBuf,
    volume_table: PathBuf,
    labels_available: bool,
    volumes: Vec<Volume>,
}

impl Default for SystemPlatform {
    fn default() -> Self {
        Self::with_paths(DEFAULT_FILE_CONTEXTS, DEFAULT_VOLUME_TABLE)
    }
}

impl SystemPlatform {
    /// Uses the default paths.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses custom file-context and volume-table paths.
    pub fn with_paths(file_contexts: impl Into<PathBuf>, volume_table: impl Into<PathBuf>) -> Self {
        Self {
            file_contexts: file_contexts.into(),
            volume_table: volume_table.into(),
            labels_available: false,
            volumes: Vec::new(),
        }
    }

    /// Whether the file contexts were found during initialization.
    pub const fn labels_available(&self) -> bool {
        self.labels_available
    }

    /// Volumes loaded during initialization.
    pub fn volumes(&self) -> &[Volume] {
        &self.volumes
    }
}

impl PlatformSetup for SystemPlatform {
    fn initialize(&mut self) {
        self.labels_available = self.file_contexts.is_file();
        if !self.labels_available {
            tracing::info!(
                target: "bu::platform",
                path = %self.file_contexts.display(),
                "security label contexts unavailable"
            );
        }

        match fs::read_to_string(&self.volume_table) {
            Ok(text) => {
                self.volumes = parse_volume_table(&text);
                tracing::debug!(
                    target: "bu::platform",
                    count = self.volumes.len(),
                    "volume table loaded"
                );
            }
            Err(error) => {
                tracing::info!(
                    target: "bu::platform",
                    path = %self.volume_table.display(),
                    "volume table unavailable: {error}"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# device            mount point  type  options
/dev/block/system   /system      ext4  ro,barrier=1

/dev/block/data     /data        ext4  noatime,nosuid
/dev/block/misc     /misc        emmc
broken-line
";

    #[test]
    fn table_parsing_skips_comments_and_short_lines() {
        let volumes = parse_volume_table(TABLE);
        assert_eq!(volumes.len(), 3);
        assert_eq!(volumes[0].device(), "/dev/block/system");
        assert_eq!(volumes[0].mount_point(), "/system");
        assert_eq!(volumes[0].fs_type(), "ext4");
        assert_eq!(volumes[0].options(), "ro,barrier=1");
        assert_eq!(volumes[2].options(), "");
    }

    #[test]
    fn initialize_loads_available_files() {
        let dir = tempfile::tempdir().unwrap();
        let contexts = dir.path().join("file_contexts");
        let table = dir.path().join("recovery.fstab");
        fs::write(&contexts, "/system(/.*)? u:object_r:system_file:s0\n").unwrap();
        fs::write(&table, TABLE).unwrap();

        let mut platform = SystemPlatform::with_paths(&contexts, &table);
        platform.initialize();
        assert!(platform.labels_available());
        assert_eq!(platform.volumes().len(), 3);
        assert_eq!(platform.volumes()[1].mount_point(), "/data");
        assert_eq!(platform.volumes()[1].device(), "/dev/block/data");
    }

    #[test]
    fn initialize_tolerates_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut platform =
            SystemPlatform::with_paths(dir.path().join("none"), dir.path().join("absent"));
        platform.initialize();
        assert!(!platform.labels_available());
        assert!(platform.volumes().is_empty());
    }
}
