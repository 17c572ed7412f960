#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` routes `tracing` events to a plain log file shared by every run
//! of the tool. Each line is prefixed with the writing process's id so
//! interleaved runs can be told apart.
//!
//! # Design
//!
//! [`PidFileLayer`] is a `tracing_subscriber` layer; [`init_tracing`] stacks
//! it under an `EnvFilter` built from [`LogConfig`]. Library crates only use
//! the `tracing` macros and never touch the file directly.
//!
//! # Invariants
//!
//! - The log file is append-only; lines are never rewritten.
//! - Logging is best-effort: open or write failures are ignored.
//!
//! # Examples
//!
//! ```
//! use logging::{LogConfig, PidFileLayer};
//! use tracing_subscriber::layer::SubscriberExt;
//!
//! let dir = tempfile::tempdir().unwrap();
//! let path = dir.path().join("bu.log");
//! let subscriber = tracing_subscriber::registry().with(PidFileLayer::new(&path));
//! tracing::subscriber::with_default(subscriber, || tracing::info!("hello"));
//!
//! let contents = std::fs::read_to_string(&path).unwrap();
//! assert!(contents.ends_with("] hello\n"));
//! # let _ = LogConfig::new();
//! ```

mod config;
mod tracing_bridge;

pub use config::{DEFAULT_DIRECTIVE, DEFAULT_LOG_PATH, LogConfig};
pub use tracing_bridge::{PidFileLayer, init_tracing};
