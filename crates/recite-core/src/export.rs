//! Score sheet export.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{Result, RosterError};
use crate::roster::Roster;

/// First line of every score sheet.
pub const SCORE_SHEET_HEADER: &str = "--- CLASS SCORES ---";

/// Deterministic file name for a score sheet taken on `date`.
pub fn score_sheet_name(date: NaiveDate) -> String {
    format!("ScoreSheet_{}.txt", date.format("%Y%m%d"))
}

/// Render the score sheet body.
pub fn render_score_sheet(roster: &Roster) -> String {
    let mut out = String::from(SCORE_SHEET_HEADER);
    out.push('\n');
    for (name, score) in roster.iter() {
        out.push_str(&format!("{name}: {score}\n"));
    }
    out
}

/// Write a score sheet into `dir` and return its path.
///
/// An export taken twice on the same day replaces the earlier one.
pub fn export_score_sheet(roster: &Roster, dir: &Path, date: NaiveDate) -> Result<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| RosterError::storage(dir, e))?;
    let path = dir.join(score_sheet_name(date));
    std::fs::write(&path, render_score_sheet(roster))
        .map_err(|e| RosterError::storage(&path, e))?;
    Ok(path)
}
