//! Append-only progress log.
//!
//! Each entry is one line, `<timestamp>,<message>`, with the local time
//! formatted as `%Y-%m-%d %H:%M:%S%.6f`. The file is opened, appended to and
//! closed on every call; no handle is kept between entries.

use chrono::{DateTime, Local};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Timestamp layout of a log line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Progress log file handle.
#[derive(Debug, Clone)]
pub struct ProgressLog {
    path: PathBuf,
}

impl ProgressLog {
    /// Create a log that appends to `path`.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a message, returning any I/O error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn try_log(&self, message: &str) -> std::io::Result<()> {
        self.try_log_at(Local::now(), message)
    }

    /// Append a message stamped with `at`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written.
    pub fn try_log_at(&self, at: DateTime<Local>, message: &str) -> std::io::Result<()> {
        let line = format_line(at, message);
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }

    /// Append a message. Failures are reported as warnings and never
    /// interrupt the caller.
    pub fn log(&self, message: &str) {
        if let Err(err) = self.try_log(message) {
            warn!(path = %self.path.display(), error = %err, entry = message, "progress log append failed");
        }
    }
}

/// Format a single log line, including the trailing newline.
pub fn format_line(at: DateTime<Local>, message: &str) -> String {
    format!("{},{}\n", at.format(TIMESTAMP_FORMAT), message)
}
