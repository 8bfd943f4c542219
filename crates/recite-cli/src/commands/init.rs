//! The `recite init` command.

use anyhow::Result;

use recite_core::config::LOCAL_CONFIG;

pub fn execute() -> Result<()> {
    if std::path::Path::new(LOCAL_CONFIG).exists() {
        println!("{LOCAL_CONFIG} already exists, skipping.");
    } else {
        std::fs::write(LOCAL_CONFIG, SAMPLE_CONFIG)?;
        println!("Created {LOCAL_CONFIG}");
    }

    println!("\nNext steps:");
    println!("  1. Run: recite add \"Student Name\"  (or: recite import roster.txt)");
    println!("  2. Run: recite pick");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# recite configuration

# Roster file, one `name,score` record per line.
data_file = "class_data.txt"

# Append-only log of every change.
audit_log = "audit_log.txt"

# Where `recite export` writes ScoreSheet_YYYYMMDD.txt.
export_dir = "."

# Names flashed before a pick is revealed, and the delay between them.
roll_count = 10
roll_delay_ms = 100
"#;
