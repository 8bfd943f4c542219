//! The `recite pick` command.
//!
//! Flashes a few uniformly random names for effect, then makes the real
//! weighted pick and records the grade.

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use rand::seq::IndexedRandom;

use recite_core::Grade;

use super::{open_classroom, prompt};

pub fn execute(config_path: Option<&Path>, grade: Option<String>, rolls: Option<u32>) -> Result<()> {
    let grade = grade
        .map(|g| g.parse::<Grade>().map_err(anyhow::Error::msg))
        .transpose()?;
    let (config, mut classroom) = open_classroom(config_path)?;

    if classroom.roster().is_empty() {
        anyhow::bail!("class list is empty, add students first");
    }

    let rolls = rolls.unwrap_or(config.roll_count);
    roll(
        &classroom.roster().names().collect::<Vec<_>>(),
        rolls,
        Duration::from_millis(config.roll_delay_ms),
    )?;

    let winner = classroom.pick()?;
    println!("\r>> WINNER: {} <<", winner.to_uppercase());

    let grade = match grade {
        Some(g) => g,
        None => {
            println!("\n[1] Correct (+1 Point)");
            println!("[2] Incorrect/Pass (No Change)");
            Grade::from_prompt(&prompt("Enter Grade: ")?)
        }
    };

    let score = classroom
        .grade(&winner, grade)
        .with_context(|| format!("failed to record grade for {winner}"))?;
    match grade {
        Grade::Correct => println!("Score updated! {winner} now has {score}."),
        Grade::Pass => println!("No points awarded."),
    }

    Ok(())
}

/// Cosmetic animation. These picks are never recorded.
fn roll(names: &[&str], rolls: u32, delay: Duration) -> Result<()> {
    let mut rng = rand::rng();
    let mut stdout = std::io::stdout();
    for _ in 0..rolls {
        if let Some(name) = names.choose(&mut rng) {
            print!("\r> {name}   ");
            stdout.flush()?;
        }
        std::thread::sleep(delay);
    }
    Ok(())
}
