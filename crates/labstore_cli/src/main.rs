//! LabStore CLI
//!
//! Command-line tools for LabStore store directories.
//!
//! # Commands
//!
//! - `inspect` - Display collections, record counts, and sizes
//! - `dump` - Pretty-print a collection's JSON value
//! - `verify` - Parse every collection value, report corrupt keys
//! - `seed` - Initialize a store directory with the demo data set

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// LabStore command-line store tools.
#[derive(Parser)]
#[command(name = "labstore")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the store directory
    #[arg(global = true, short, long)]
    path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display collections, record counts, and sizes
    Inspect {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Pretty-print a collection's JSON value
    Dump {
        /// Collection key to dump, e.g. "laboratories"
        #[arg(short, long)]
        collection: String,
    },

    /// Parse every collection value and report corrupt keys
    Verify,

    /// Initialize a store directory with the demo data set
    Seed,

    /// Show version information
    Version,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Inspect { format } => {
            let path = cli.path.ok_or("Store path required for inspect")?;
            commands::inspect::run(&path, &format)?;
        }
        Commands::Dump { collection } => {
            let path = cli.path.ok_or("Store path required for dump")?;
            commands::dump::run(&path, &collection)?;
        }
        Commands::Verify => {
            let path = cli.path.ok_or("Store path required for verify")?;
            commands::verify::run(&path)?;
        }
        Commands::Seed => {
            let path = cli.path.ok_or("Store path required for seed")?;
            commands::seed::run(&path)?;
        }
        Commands::Version => {
            println!("LabStore CLI v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
