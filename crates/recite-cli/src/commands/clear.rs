//! The `recite clear` and `recite reset` commands.

use std::path::Path;

use anyhow::Result;

use super::{open_classroom, prompt};

pub fn execute(config_path: Option<&Path>, yes: bool, wipe_audit: bool) -> Result<()> {
    let (_, mut classroom) = open_classroom(config_path)?;

    if !yes {
        println!("!!! DANGER ZONE !!!");
        if wipe_audit {
            println!("This will permanently delete ALL student names, scores, and the audit log.");
        } else {
            println!("This will permanently delete ALL student names and scores.");
        }
        let answer = prompt("Type 'YES' to confirm: ")?;
        if answer != "YES" {
            println!("Operation cancelled. Data is safe.");
            return Ok(());
        }
    }

    if wipe_audit {
        classroom.reset()?;
        println!("Success: class data and audit log have been wiped.");
    } else {
        classroom.clear()?;
        println!("Success: all student data has been cleared.");
    }

    Ok(())
}
