// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Logging Bootstrap
//
// Establishes, exactly once per process, the two sinks every later component
// logs through: an append-mode file at a fixed name inside the active work
// directory, and a console sink mirroring the same records. The debug flag
// decides verbosity and record detail for both sinks at once.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Fixed log filename inside the active work directory. Records are
/// appended; there is no rotation within one invocation.
pub const LOG_FILE_NAME: &str = "pilotlog.txt";

/// Record layout decided once by the debug flag and applied to both sinks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormat {
    /// Default verbosity when the environment does not override it.
    pub verbosity: &'static str,

    /// Emit the name of the thread that produced the record.
    pub thread_names: bool,

    /// Emit the module path that produced the record.
    pub targets: bool,
}

/// Field detail for the given debug flag: debug mode strictly adds fields
/// and lowers the level floor.
pub fn record_format(debug: bool) -> RecordFormat {
    if debug {
        RecordFormat {
            verbosity: "debug",
            thread_names: true,
            targets: true,
        }
    } else {
        RecordFormat {
            verbosity: "info",
            thread_names: false,
            targets: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to open log file {path}: {source}")]
    OpenLogFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid log filter: {0}")]
    Filter(String),

    #[error("Logging already initialized")]
    AlreadyInitialized,
}

/// Install the dual-sink logging pipeline.
///
/// Must run before any other component logs and must not run twice: a second
/// invocation would double-emit every record, so it fails with
/// [`LoggingError::AlreadyInitialized`] instead.
pub fn init_logging(debug: bool, log_path: &Path) -> Result<(), LoggingError> {
    let format = record_format(debug);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(format.verbosity))
        .map_err(|err| LoggingError::Filter(err.to_string()))?;

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .map_err(|source| LoggingError::OpenLogFile {
            path: log_path.to_path_buf(),
            source,
        })?;

    let file_sink = tracing_subscriber::fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(format.targets)
        .with_thread_names(format.thread_names);

    let console_sink = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_target(format.targets)
        .with_thread_names(format.thread_names);

    tracing_subscriber::registry()
        .with(filter)
        .with(file_sink)
        .with(console_sink)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
