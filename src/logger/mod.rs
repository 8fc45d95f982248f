//! Logger module
//!
//! Two independent append-only sinks, info and error, owned by whoever
//! constructs the [`Logger`]. The binary builds exactly one at startup and
//! places it in the dependency container; nothing is looked up from global
//! scope. Every event is one self-contained, timestamped line.

pub mod writer;

use writer::LogTarget;

use chrono::Local;
use std::io;

/// Timestamped two-sink logger
pub struct Logger {
    info: LogTarget,
    error: LogTarget,
}

impl Logger {
    /// Open the configured sinks. A missing path means the corresponding
    /// standard stream (stdout for info, stderr for error).
    pub fn open(info_log_file: Option<&str>, error_log_file: Option<&str>) -> io::Result<Self> {
        Ok(Self {
            info: LogTarget::open(info_log_file, LogTarget::Stdout)?,
            error: LogTarget::open(error_log_file, LogTarget::Stderr)?,
        })
    }

    /// Logger writing to stdout/stderr, for startup fallback and tests
    #[must_use]
    pub const fn stdio() -> Self {
        Self {
            info: LogTarget::Stdout,
            error: LogTarget::Stderr,
        }
    }

    /// Append one line to the info sink
    pub fn info(&self, message: &str) {
        self.info.write_line(&format_line("INFO", message));
    }

    /// Append one line to the error sink
    pub fn error(&self, message: &str) {
        self.error.write_line(&format_line("ERROR", message));
    }
}

/// Format a single log line with a local timestamp
fn format_line(level: &str, message: &str) -> String {
    format!(
        "{} [{level}] {message}",
        Local::now().format("%Y-%m-%d %H:%M:%S%.3f")
    )
}
