//! Best-effort error log.
//!
//! Install steps never abort the install. Their failures are collected here
//! and flushed to a plain-text file the user can inspect afterwards.

use crate::error::{ReadyError, Result};
use std::fmt::Write as FmtWrite;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use tracing::{debug, warn};

/// One failed install step.
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Step that failed (e.g. "write config").
    pub step: String,
    /// Rendered error message.
    pub message: String,
    /// Extra context written below the message.
    pub details: Option<String>,
}

/// In-memory buffer of install-step failures.
#[derive(Debug, Default)]
pub struct ErrorLog {
    entries: Vec<LogEntry>,
    /// Number of entries already written to disk.
    flushed: usize,
}

impl ErrorLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failed step.
    pub fn record(&mut self, step: &str, err: &ReadyError) {
        warn!("{} failed: {}", step, err);
        self.entries.push(LogEntry {
            step: step.to_string(),
            message: render_error_chain(err),
            details: None,
        });
    }

    /// Record a failed step with extra context for the user.
    pub fn record_with_details(&mut self, step: &str, err: &ReadyError, details: String) {
        self.record(step, err);
        if let Some(last) = self.entries.last_mut() {
            last.details = Some(details);
        }
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Render every entry as text.
    pub fn render(&self) -> String {
        render_entries(&self.entries)
    }

    /// Replace the file at `path` with the full log.
    ///
    /// An empty log still truncates the file so errors from an earlier
    /// install do not linger.
    pub fn write_to(&mut self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .map_err(|e| ReadyError::io_action("write error log", path, e))?;
        self.flushed = self.entries.len();
        debug!("Wrote error log to {}", path.display());
        Ok(())
    }

    /// Append entries recorded since the last write.
    pub fn append_pending(&mut self, path: &Path) -> Result<()> {
        if self.flushed >= self.entries.len() {
            return Ok(());
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| ReadyError::io_action("open error log", path, e))?;

        let pending = render_entries(&self.entries[self.flushed..]);
        file.write_all(pending.as_bytes())
            .map_err(|e| ReadyError::io_action("append error log", path, e))?;

        self.flushed = self.entries.len();
        Ok(())
    }
}

fn render_entries(entries: &[LogEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(out, "WARNING: {} failed.", entry.step);
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", entry.message);
        if let Some(ref details) = entry.details {
            let _ = writeln!(out);
            let _ = writeln!(out, "{}", details);
        }
        let _ = writeln!(out);
    }
    out
}

/// Render an error with its `source()` chain, one cause per line.
fn render_error_chain(err: &ReadyError) -> String {
    let mut out = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        let _ = write!(out, "\n  caused by: {}", cause);
        source = cause.source();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_error() -> ReadyError {
        ReadyError::ExecutableNotFound {
            name: "pandoctools".into(),
        }
    }

    #[test]
    fn test_record_and_render() {
        let mut log = ErrorLog::new();
        log.record("menu shortcut", &sample_error());

        assert_eq!(log.entries().len(), 1);
        let text = log.render();
        assert!(text.contains("WARNING: menu shortcut failed."));
        assert!(text.contains("Executable not found: pandoctools"));
    }

    #[test]
    fn test_details_are_rendered() {
        let mut log = ErrorLog::new();
        log.record_with_details("write config", &sample_error(), "File:\n/x".into());
        assert!(log.render().contains("File:\n/x"));
    }

    #[test]
    fn test_empty_log_truncates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.txt");
        fs::write(&path, "stale").unwrap();

        let mut log = ErrorLog::new();
        log.write_to(&path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_append_pending_only_writes_new_entries() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("log.txt");

        let mut log = ErrorLog::new();
        log.record("first", &sample_error());
        log.write_to(&path).unwrap();

        log.record("second", &ReadyError::Other("boom".into()));
        log.append_pending(&path).unwrap();
        log.append_pending(&path).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("WARNING: first failed.").count(), 1);
        assert_eq!(text.matches("WARNING: second failed.").count(), 1);
    }

    #[test]
    fn test_error_chain_includes_source() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = ReadyError::Io {
            message: "write config".into(),
            path: None,
            source: Some(io),
        };
        assert!(render_error_chain(&err).contains("caused by: denied"));
    }
}
