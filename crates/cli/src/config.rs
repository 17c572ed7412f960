//! Runtime settings, with environment overrides for the fixed paths.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use logging::LogConfig;

/// Status file written at exit when no override is configured.
pub const DEFAULT_STATUS_PATH: &str = "/tmp/burc";

/// Pause between closing the socket and reporting the exit status.
pub const DEFAULT_CLOSE_DELAY: Duration = Duration::from_secs(1);

/// Overrides the status file path.
pub const STATUS_FILE_VAR: &str = "BU_STATUS_FILE";
/// Overrides the log file path.
pub const LOG_FILE_VAR: &str = "BU_LOG_FILE";
/// Overrides the log filter directive.
pub const LOG_FILTER_VAR: &str = "BU_LOG";
/// Overrides the post-close pause, in milliseconds.
pub const CLOSE_DELAY_VAR: &str = "BU_CLOSE_DELAY_MS";

/// Settings for one run.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RuntimeConfig {
    status_path: PathBuf,
    log: LogConfig,
    close_delay: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            status_path: PathBuf::from(DEFAULT_STATUS_PATH),
            log: LogConfig::default(),
            close_delay: DEFAULT_CLOSE_DELAY,
        }
    }
}

impl RuntimeConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// Empty values and unparsable delays leave the default in place.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let present = |key: &str| lookup(key).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(path) = present(STATUS_FILE_VAR) {
            config.status_path = PathBuf::from(path);
        }
        if let Some(path) = present(LOG_FILE_VAR) {
            config.log = config.log.with_path(path);
        }
        if let Some(directive) = present(LOG_FILTER_VAR).and_then(|value| value.into_string().ok())
        {
            config.log = config.log.with_directive(directive);
        }
        if let Some(millis) = present(CLOSE_DELAY_VAR)
            .and_then(|value| value.into_string().ok())
            .and_then(|value| value.parse::<u64>().ok())
        {
            config.close_delay = Duration::from_millis(millis);
        }
        config
    }

    /// Sets the status file path.
    #[must_use]
    pub fn with_status_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.status_path = path.into();
        self
    }

    /// Sets the post-close pause.
    #[must_use]
    pub const fn with_close_delay(mut self, delay: Duration) -> Self {
        self.close_delay = delay;
        self
    }

    /// Status file path.
    pub fn status_path(&self) -> &Path {
        &self.status_path
    }

    /// Logging settings.
    pub const fn log(&self) -> &LogConfig {
        &self.log
    }

    /// Post-close pause.
    pub const fn close_delay(&self) -> Duration {
        self.close_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), OsString::from(v)))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_fixed_paths() {
        let config = RuntimeConfig::from_lookup(lookup(&[]));
        assert_eq!(config.status_path(), Path::new("/tmp/burc"));
        assert_eq!(config.log().path(), Path::new("/tmp/bu.log"));
        assert_eq!(config.log().directive(), "info");
        assert_eq!(config.close_delay(), Duration::from_secs(1));
    }

    #[test]
    fn environment_overrides_apply() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("BU_STATUS_FILE", "/run/bu/rc"),
            ("BU_LOG_FILE", "/run/bu/log"),
            ("BU_LOG", "debug"),
            ("BU_CLOSE_DELAY_MS", "0"),
        ]));
        assert_eq!(config.status_path(), Path::new("/run/bu/rc"));
        assert_eq!(config.log().path(), Path::new("/run/bu/log"));
        assert_eq!(config.log().directive(), "debug");
        assert_eq!(config.close_delay(), Duration::ZERO);
    }

    #[test]
    fn malformed_values_keep_defaults() {
        let config = RuntimeConfig::from_lookup(lookup(&[
            ("BU_STATUS_FILE", ""),
            ("BU_CLOSE_DELAY_MS", "soon"),
        ]));
        assert_eq!(config, RuntimeConfig::default());
    }
}
