//! crates/logging/src/config.rs
//! Where log lines go and which events are kept.

use std::path::{Path, PathBuf};

/// Log file used when no override is configured.
pub const DEFAULT_LOG_PATH: &str = "/tmp/bu.log";

/// Filter directive used when no override is configured.
pub const DEFAULT_DIRECTIVE: &str = "info";

/// Log destination and filter settings.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogConfig {
    path: PathBuf,
    directive: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_LOG_PATH),
            directive: DEFAULT_DIRECTIVE.to_owned(),
        }
    }
}

impl LogConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the log file path.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = path.into();
        self
    }

    /// Sets the `EnvFilter` directive, e.g. `"debug"` or `"bu::io=trace"`.
    #[must_use]
    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = directive.into();
        self
    }

    /// Log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Filter directive.
    pub fn directive(&self) -> &str {
        &self.directive
    }
}
