//! The `recite import` command.

use std::path::Path;

use anyhow::{Context, Result};

use recite_core::import::LineOutcome;

use super::open_classroom;

pub fn execute(config_path: Option<&Path>, path: &Path) -> Result<()> {
    let (_, mut classroom) = open_classroom(config_path)?;
    let report = classroom
        .import_file(path)
        .with_context(|| format!("failed to import {}", path.display()))?;

    for line in &report.lines {
        match &line.outcome {
            LineOutcome::Added { name, score } => println!("Imported: {name} ({score})"),
            LineOutcome::Duplicate { name } => println!("Skipped (duplicate): {name}"),
            LineOutcome::Malformed { reason } => {
                println!("Skipped line {}: {reason}", line.line_no)
            }
        }
    }

    let added = report.added();
    if added > 0 {
        println!("\nSuccess! Added {added} new students.");
    } else {
        println!("\nNo new students added.");
    }

    Ok(())
}
