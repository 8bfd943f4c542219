//! The `recite list` command.

use std::path::Path;

use anyhow::Result;
use clap::ValueEnum;

use recite_core::selector::probabilities;

use super::open_classroom;

/// How `recite list` prints the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    Table,
    Json,
}

pub fn execute(config_path: Option<&Path>, format: ListFormat) -> Result<()> {
    let (_, classroom) = open_classroom(config_path)?;
    let roster = classroom.roster();

    match format {
        ListFormat::Json => {
            println!("{}", serde_json::to_string_pretty(roster)?);
        }
        ListFormat::Table => {
            use comfy_table::{Cell, Table};

            println!("Class list ({})", roster.len());
            if roster.is_empty() {
                println!("No students yet. Add some with `recite add` or `recite import`.");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Name", "Score", "Pick chance"]);
            for (name, chance) in probabilities(roster) {
                let score = roster.get(name).unwrap_or_default();
                table.add_row(vec![
                    Cell::new(name),
                    Cell::new(score),
                    Cell::new(format!("{:.1}%", chance * 100.0)),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}
