//! Append-only audit log.
//!
//! Every state-changing action is recorded as `[YYYY-MM-DD HH:MM:SS] message`.
//! The core never reads this file back.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

/// Timestamp layout used for every entry.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Handle on the audit log file.
#[derive(Debug, Clone)]
pub struct AuditLog {
    path: PathBuf,
}

impl AuditLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an entry stamped with the current local time.
    pub fn append(&self, message: &str) -> io::Result<()> {
        self.append_at(Local::now().naive_local(), message)
    }

    /// Append an entry with an explicit timestamp.
    pub fn append_at(&self, at: NaiveDateTime, message: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{}", format_entry(at, message))
    }

    /// Append an entry, reporting failure as a warning instead of an error.
    ///
    /// Used after a mutation has already been persisted: a log failure must
    /// not undo or fail it.
    pub fn record(&self, message: &str) {
        if let Err(e) = self.append(message) {
            tracing::warn!(
                "failed to write audit entry to {}: {e} (entry: {message})",
                self.path.display()
            );
        }
    }

    /// Empty the log. Only used by a full class reset.
    pub fn truncate(&self) -> io::Result<()> {
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&self.path)?;
        Ok(())
    }
}

/// Render one log line (without the trailing newline).
pub fn format_entry(at: NaiveDateTime, message: &str) -> String {
    format!("[{}] {message}", at.format(TIMESTAMP_FORMAT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn entry_format() {
        assert_eq!(
            format_entry(at(8, 5, 3), "Added student: Alice"),
            "[2024-03-09 08:05:03] Added student: Alice"
        );
    }

    #[test]
    fn appends_without_rewriting() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("audit_log.txt"));
        log.append_at(at(9, 0, 0), "first").unwrap();
        log.append_at(at(9, 0, 1), "second").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "[2024-03-09 09:00:00] first\n[2024-03-09 09:00:01] second\n"
        );
    }

    #[test]
    fn append_uses_current_time_layout() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("audit_log.txt"));
        log.append("Picked: Alice").unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        let line = content.lines().next().unwrap();
        let stamp = &line[1..20];
        assert!(NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok());
        assert!(line.ends_with("] Picked: Alice"));
    }

    #[test]
    fn record_swallows_failures() {
        let dir = tempfile::tempdir().unwrap();
        // The log path is a directory, so opening it for append fails.
        let log = AuditLog::new(dir.path());
        log.record("ignored");
        assert!(log.append("ignored").is_err());
    }

    #[test]
    fn truncate_empties_log() {
        let dir = tempfile::tempdir().unwrap();
        let log = AuditLog::new(dir.path().join("audit_log.txt"));
        log.append("one").unwrap();
        log.truncate().unwrap();
        assert_eq!(std::fs::read_to_string(log.path()).unwrap(), "");
    }
}
