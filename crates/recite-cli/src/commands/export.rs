//! The `recite export` command.

use std::path::Path;

use anyhow::Result;

use super::open_classroom;

pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let (_, classroom) = open_classroom(config_path)?;
    let today = chrono::Local::now().date_naive();
    let path = classroom.export(today)?;
    println!("Exported to {}", path.display());
    Ok(())
}
