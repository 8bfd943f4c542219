pub mod clear;
pub mod export;
pub mod import;
pub mod init;
pub mod list;
pub mod pick;
pub mod roster;

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::{Context, Result};

use recite_core::{Classroom, ReciteConfig};

/// Load the config and the roster it points at.
pub fn open_classroom(config_path: Option<&Path>) -> Result<(ReciteConfig, Classroom)> {
    let config = recite_core::load_config_from(config_path)?;
    let classroom = Classroom::open(&config)
        .with_context(|| format!("failed to load roster {}", config.data_file.display()))?;
    tracing::debug!(
        "opened {} ({} students)",
        config.data_file.display(),
        classroom.roster().len()
    );
    Ok((config, classroom))
}

/// Print a prompt and read one trimmed line from stdin.
///
/// End of input reads as an empty answer.
pub fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    Ok(line.trim().to_string())
}
