//! crates/logging/src/tracing_bridge.rs
//! Tracing layer that appends each event to the log file.
//!
//! Every event becomes one line, `"[<pid>] <message> key=value ..."`. The file
//! is opened in append mode for each event and closed again, so lines from
//! earlier runs are kept and a missing or unwritable file never interrupts
//! the caller.

use std::fmt::{self, Write as _};
use std::fs::OpenOptions;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tracing::Subscriber;
use tracing::field::{Field, Visit};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

use crate::config::LogConfig;

/// A tracing layer writing pid-prefixed lines to a file.
#[derive(Clone, Debug)]
pub struct PidFileLayer {
    path: PathBuf,
    pid: u32,
}

impl PidFileLayer {
    /// Creates a layer appending to `path`, tagged with this process's id.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pid: std::process::id(),
        }
    }

    /// Log file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renders one log line, newline included.
    pub fn render_line(&self, message: &str) -> String {
        format!("[{}] {message}\n", self.pid)
    }

    fn append(&self, line: &str) {
        let Ok(mut file) = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
        else {
            return;
        };
        let _ = file.write_all(line.as_bytes());
    }
}

impl<S> Layer<S> for PidFileLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        self.append(&self.render_line(&visitor.finish()));
    }
}

/// Collects the event message followed by its other fields.
#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: String,
}

impl MessageVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.trim_start().to_owned()
        } else {
            self.message + &self.fields
        }
    }
}

impl Visit for MessageVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        } else {
            let _ = write!(self.fields, " {}={value:?}", field.name());
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        } else {
            let _ = write!(self.fields, " {}={value}", field.name());
        }
    }
}

/// Installs the global subscriber: `config`'s filter plus a [`PidFileLayer`].
///
/// An invalid directive falls back to [`DEFAULT_DIRECTIVE`](crate::DEFAULT_DIRECTIVE).
/// Returns `false` when a global subscriber was already installed.
pub fn init_tracing(config: &LogConfig) -> bool {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::try_new(config.directive())
        .unwrap_or_else(|_| EnvFilter::new(crate::DEFAULT_DIRECTIVE));

    tracing_subscriber::registry()
        .with(filter)
        .with(PidFileLayer::new(config.path()))
        .try_init()
        .is_ok()
}
