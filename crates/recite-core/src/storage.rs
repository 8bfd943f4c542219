//! Roster persistence.
//!
//! The roster lives in a plain text file with one `name,score` record per
//! line. The score is always the field after the last comma, so names may
//! themselves contain commas. Saves go through a temporary file and a rename
//! so a failed write never leaves a half-written roster behind.

use std::fs::{create_dir_all, remove_file, rename, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::str::Utf8Error;

use crate::error::{Result, RosterError};
use crate::roster::{validate_name, Roster};

/// Separator between name and score in a stored record.
pub const DELIMITER: char = ',';

/// Handle on the durable roster file.
#[derive(Debug, Clone)]
pub struct RosterFile {
    path: PathBuf,
}

impl RosterFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the roster from disk.
    ///
    /// A missing file yields an empty roster. Malformed lines are skipped
    /// with a warning rather than failing the whole load.
    pub fn load(&self) -> Result<Roster> {
        let content = match std::fs::read(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("no roster at {}, starting empty", self.path.display());
                return Ok(Roster::new());
            }
            Err(e) => return Err(RosterError::storage(&self.path, e)),
        };

        let roster = parse_records(&content, &self.path);
        tracing::debug!(
            "loaded {} students from {}",
            roster.len(),
            self.path.display()
        );
        Ok(roster)
    }

    /// Rewrite the whole file from `roster`.
    pub fn save(&self, roster: &Roster) -> Result<()> {
        self.write_atomic(roster)
            .map_err(|e| RosterError::storage(&self.path, e))?;
        tracing::debug!("saved {} students to {}", roster.len(), self.path.display());
        Ok(())
    }

    fn write_atomic(&self, roster: &Roster) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }

        let mut tmp_path = self.path.clone().into_os_string();
        tmp_path.push(".tmp");
        let tmp_path = PathBuf::from(tmp_path);

        let written = write_records(&tmp_path, roster)
            .and_then(|()| rename(&tmp_path, &self.path));
        if written.is_err() {
            let _ = remove_file(&tmp_path);
        }
        written
    }
}

fn write_records(path: &Path, roster: &Roster) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)?;
    for (name, score) in roster.iter() {
        writeln!(file, "{}", format_record(name, score))?;
    }
    file.sync_all()
}

/// Split raw file bytes into lines, decoding each one separately.
///
/// A line that is not valid UTF-8 comes back as an error without affecting
/// its neighbours. `\n` and `\r\n` endings are both accepted.
pub fn decode_lines(
    bytes: &[u8],
) -> impl Iterator<Item = std::result::Result<&str, Utf8Error>> + '_ {
    bytes.split(|b| *b == b'\n').map(|line| {
        let line = line.strip_suffix(b"\r").unwrap_or(line);
        std::str::from_utf8(line)
    })
}

/// Render one stored record.
pub fn format_record(name: &str, score: u32) -> String {
    format!("{name}{DELIMITER}{score}")
}

/// Split a record at its last delimiter into `(name, score)`.
///
/// Returns `None` when there is no delimiter, the name is invalid, or the
/// score is not a non-negative integer.
pub fn parse_record(line: &str) -> Option<(String, u32)> {
    let (name, score) = line.trim().rsplit_once(DELIMITER)?;
    let score = score.trim().parse::<u32>().ok()?;
    let name = validate_name(name).ok()?;
    Some((name, score))
}

fn parse_records(content: &[u8], source: &Path) -> Roster {
    let mut roster = Roster::new();
    for (idx, line) in decode_lines(content).enumerate() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(
                    "{}:{}: skipping record that is not valid UTF-8: {e}",
                    source.display(),
                    idx + 1
                );
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        match parse_record(line) {
            Some((name, score)) => {
                if roster.upsert(name.clone(), score) {
                    tracing::warn!(
                        "{}:{}: duplicate record for {name}, keeping the later one",
                        source.display(),
                        idx + 1
                    );
                }
            }
            None => {
                tracing::warn!(
                    "{}:{}: skipping malformed record {:?}",
                    source.display(),
                    idx + 1,
                    line
                );
            }
        }
    }
    roster
}
