//! recite CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

use commands::list::ListFormat;

#[derive(Parser)]
#[command(name = "recite", version, about = "Classroom roster and fair cold-call picker")]
struct Cli {
    /// Config file path (default: ./recite.toml, then ~/.config/recite/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a starter recite.toml
    Init,

    /// Show the class list with scores
    List {
        /// Output format
        #[arg(long, value_enum, default_value_t = ListFormat::Table)]
        format: ListFormat,
    },

    /// Add a student with a score of 0
    Add {
        /// Student name
        name: String,
    },

    /// Remove a student and their score
    Remove {
        /// Student name
        name: String,
    },

    /// Overwrite a student's score
    SetScore {
        /// Student name
        name: String,

        /// New score (non-negative)
        #[arg(allow_negative_numbers = true)]
        score: i64,
    },

    /// Import students from a file of `name` or `name,score` lines
    Import {
        /// File to import
        path: PathBuf,
    },

    /// Pick a student, favoring those with fewer points, then grade them
    Pick {
        /// Grade to record: correct, pass (prompted when omitted)
        #[arg(long)]
        grade: Option<String>,

        /// Names to flash before the pick (default from config)
        #[arg(long)]
        rolls: Option<u32>,
    },

    /// Write today's score sheet
    Export,

    /// Delete all students and scores
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Delete all students and scores and wipe the audit log
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("recite_core=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();
    let config = cli.config.as_deref();

    let result = match cli.command {
        Commands::Init => commands::init::execute(),
        Commands::List { format } => commands::list::execute(config, format),
        Commands::Add { name } => commands::roster::add(config, &name),
        Commands::Remove { name } => commands::roster::remove(config, &name),
        Commands::SetScore { name, score } => commands::roster::set_score(config, &name, score),
        Commands::Import { path } => commands::import::execute(config, &path),
        Commands::Pick { grade, rolls } => commands::pick::execute(config, grade, rolls),
        Commands::Export => commands::export::execute(config),
        Commands::Clear { yes } => commands::clear::execute(config, yes, false),
        Commands::Reset { yes } => commands::clear::execute(config, yes, true),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
