//! Import of student lists from line-oriented text.
//!
//! Each non-blank line is either `name` or `name,score`. Only names not
//! already on the roster are added; existing scores are never touched.
//! Lines that cannot be understood are reported and skipped, they do not
//! abort the import.

use std::path::Path;

use serde::Serialize;

use crate::error::{Result, RosterError};
use crate::roster::{validate_name, Roster};
use crate::storage::{decode_lines, DELIMITER};

/// What happened to one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LineOutcome {
    /// A new student was added.
    Added { name: String, score: u32 },
    /// The name was already present and left alone.
    Duplicate { name: String },
    /// The line was malformed and skipped.
    Malformed { reason: String },
}

/// Outcome of one line, tagged with its 1-based line number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportLine {
    pub line_no: usize,
    #[serde(flatten)]
    pub outcome: LineOutcome,
}

/// Per-line report of a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    pub lines: Vec<ImportLine>,
}

impl MergeReport {
    /// Number of students newly added.
    pub fn added(&self) -> usize {
        self.count(|o| matches!(o, LineOutcome::Added { .. }))
    }

    /// Number of lines skipped because the name already existed.
    pub fn duplicates(&self) -> usize {
        self.count(|o| matches!(o, LineOutcome::Duplicate { .. }))
    }

    /// Number of malformed lines.
    pub fn malformed(&self) -> usize {
        self.count(|o| matches!(o, LineOutcome::Malformed { .. }))
    }

    /// Malformed lines as errors, for callers that want to surface them.
    pub fn errors(&self) -> impl Iterator<Item = RosterError> + '_ {
        self.lines.iter().filter_map(|l| match &l.outcome {
            LineOutcome::Malformed { reason } => Some(RosterError::MalformedImportLine {
                line_no: l.line_no,
                reason: reason.clone(),
            }),
            _ => None,
        })
    }

    fn count(&self, pred: impl Fn(&LineOutcome) -> bool) -> usize {
        self.lines.iter().filter(|l| pred(&l.outcome)).count()
    }
}

/// Parse one trimmed, non-empty import line into `(name, score)`.
///
/// A line with a delimiter must end in a non-negative integer score; names
/// containing the delimiter therefore need an explicit score.
pub fn parse_import_line(line: &str, line_no: usize) -> Result<(String, u32)> {
    let malformed = |reason: String| RosterError::MalformedImportLine { line_no, reason };

    let (name, score) = match line.rsplit_once(DELIMITER) {
        Some((name, score_str)) => {
            let score_str = score_str.trim();
            let score = score_str.parse::<u32>().map_err(|_| {
                malformed(format!(
                    "expected a non-negative integer score after the last '{DELIMITER}', got {score_str:?}"
                ))
            })?;
            (name, score)
        }
        None => (line, 0),
    };

    let name = validate_name(name).map_err(|e| malformed(e.to_string()))?;
    Ok((name, score))
}

/// Merge `lines` into `roster`, returning what happened to each line.
///
/// Blank lines are skipped silently. A name repeated within the input is a
/// duplicate on its second appearance.
pub fn merge<'a, I>(roster: &mut Roster, lines: I) -> MergeReport
where
    I: IntoIterator<Item = &'a str>,
{
    merge_decoded(roster, lines.into_iter().map(Ok::<&str, String>))
}

/// Merge lines that may have failed to decode; a decode failure is a
/// malformed line carrying the given reason.
fn merge_decoded<'a, I>(roster: &mut Roster, lines: I) -> MergeReport
where
    I: Iterator<Item = std::result::Result<&'a str, String>>,
{
    let mut report = MergeReport::default();

    for (idx, raw) in lines.enumerate() {
        let line_no = idx + 1;
        let line = match raw {
            Ok(raw) => raw.trim(),
            Err(reason) => {
                tracing::warn!("import line {line_no} skipped: {reason}");
                report.lines.push(ImportLine {
                    line_no,
                    outcome: LineOutcome::Malformed { reason },
                });
                continue;
            }
        };
        if line.is_empty() {
            continue;
        }

        let outcome = match parse_import_line(line, line_no) {
            Ok((name, score)) => match roster.insert(&name, score) {
                Ok(name) => LineOutcome::Added { name, score },
                Err(RosterError::DuplicateName(name)) => LineOutcome::Duplicate { name },
                Err(e) => LineOutcome::Malformed {
                    reason: e.to_string(),
                },
            },
            Err(RosterError::MalformedImportLine { reason, .. }) => {
                LineOutcome::Malformed { reason }
            }
            Err(e) => LineOutcome::Malformed {
                reason: e.to_string(),
            },
        };

        if let LineOutcome::Malformed { reason } = &outcome {
            tracing::warn!("import line {line_no} skipped: {reason}");
        }
        report.lines.push(ImportLine { line_no, outcome });
    }

    report
}

/// Read an import file and merge it into `roster`.
pub fn merge_file(roster: &mut Roster, path: &Path) -> Result<MergeReport> {
    let content = std::fs::read(path).map_err(|e| RosterError::storage(path, e))?;
    let lines = decode_lines(&content).map(|line| {
        line.map_err(|e| format!("line is not valid UTF-8: {e}"))
    });
    Ok(merge_decoded(roster, lines))
}
