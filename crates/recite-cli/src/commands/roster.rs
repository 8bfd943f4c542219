//! The `recite add`, `recite remove` and `recite set-score` commands.

use std::path::Path;

use anyhow::Result;

use super::open_classroom;

pub fn add(config_path: Option<&Path>, name: &str) -> Result<()> {
    let (_, mut classroom) = open_classroom(config_path)?;
    let name = classroom.add(name)?;
    println!("Success: {name} added.");
    Ok(())
}

pub fn remove(config_path: Option<&Path>, name: &str) -> Result<()> {
    let (_, mut classroom) = open_classroom(config_path)?;
    let score = classroom.remove(name)?;
    println!("Removed {name} (score was {score}).");
    Ok(())
}

pub fn set_score(config_path: Option<&Path>, name: &str, score: i64) -> Result<()> {
    let (_, mut classroom) = open_classroom(config_path)?;
    let old = classroom.set_score(name, score)?;
    println!("{name}: {old} -> {score}");
    Ok(())
}
