//! Log target module
//!
//! A log target is an append-only line sink: stdout, stderr or a file.
//! Each line goes out in a single write under the target's lock, so
//! concurrent writers never interleave inside a line.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

/// Log output target
pub enum LogTarget {
    /// Write to stdout
    Stdout,
    /// Write to stderr
    Stderr,
    /// Write to file
    File(Mutex<File>),
}

impl LogTarget {
    /// Open a target for the given path, falling back to the given
    /// standard stream when no path is configured
    pub fn open(path: Option<&str>, fallback: Self) -> io::Result<Self> {
        match path {
            Some(p) => Ok(Self::File(Mutex::new(open_log_file(p)?))),
            None => Ok(fallback),
        }
    }

    /// Append one complete line to the target
    pub fn write_line(&self, line: &str) {
        match self {
            Self::Stdout => {
                println!("{line}");
            }
            Self::Stderr => {
                eprintln!("{line}");
            }
            Self::File(file) => {
                if let Ok(mut f) = file.lock() {
                    let _ = writeln!(f, "{line}");
                }
            }
        }
    }
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> io::Result<File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_file_target_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let target = LogTarget::open(path.to_str(), LogTarget::Stdout).unwrap();

        target.write_line("one");
        target.write_line("two");

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "one\ntwo\n");
    }

    #[test]
    fn test_concurrent_writes_stay_line_atomic() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.log");
        let target = Arc::new(LogTarget::open(path.to_str(), LogTarget::Stdout).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let target = Arc::clone(&target);
                std::thread::spawn(move || {
                    for _ in 0..50 {
                        target.write_line(&format!("writer-{i} says hello"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|l| l.ends_with("says hello")));
    }

    #[test]
    fn test_open_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs/nested/app.log");
        let target = LogTarget::open(path.to_str(), LogTarget::Stdout).unwrap();
        target.write_line("hello");
        assert!(path.exists());
    }
}
