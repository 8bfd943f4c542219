//! Roster error types.
//!
//! Every fallible operation in `recite-core` reports one of these, so a
//! presentation layer can tell a user mistake (duplicate name, bad score)
//! apart from a storage failure without string matching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while managing or selecting from a roster.
#[derive(Debug, Error)]
pub enum RosterError {
    /// A student with this exact name is already on the roster.
    #[error("student already exists: {0}")]
    DuplicateName(String),

    /// No student with this name is on the roster.
    #[error("student not found: {0}")]
    NotFound(String),

    /// Scores must be non-negative and fit in a `u32`.
    #[error("invalid score {0}: scores must be a non-negative integer")]
    InvalidScore(i64),

    /// The name is empty or contains a line break.
    #[error("invalid student name {0:?}: names must be non-empty and single-line")]
    InvalidName(String),

    /// A pick was requested from a roster with no students.
    #[error("roster is empty")]
    EmptyRoster,

    /// A grade was submitted without a matching pick.
    #[error("cannot grade {name}: {reason}")]
    InvalidState { name: String, reason: String },

    /// One line of an import file could not be understood.
    #[error("line {line_no}: {reason}")]
    MalformedImportLine { line_no: usize, reason: String },

    /// Reading or writing a roster, log, or export file failed.
    #[error("storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file could not be read or parsed.
    #[error("config error: {0}")]
    Config(String),
}

impl RosterError {
    /// Wrap an I/O error with the path it happened on.
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RosterError::Storage {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` if this error came from the filesystem rather than
    /// from the request itself.
    pub fn is_storage(&self) -> bool {
        matches!(self, RosterError::Storage { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RosterError>;
