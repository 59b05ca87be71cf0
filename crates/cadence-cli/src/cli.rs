//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// cadence: validate marketing-mix datasets before modeling
#[derive(Parser)]
#[command(name = "cadence")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate a data file and print the report
    Validate {
        /// Path to the data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Write the dataset record to this path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON file overriding naming conventions and thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show sample rows, date range and validation status
    Preview {
        /// Path to the data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Number of sample rows
        #[arg(short = 'n', long, default_value = "10")]
        rows: usize,

        /// JSON file overriding naming conventions and thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List spend channels inferred from column names
    Channels {
        /// Path to the data file (CSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// JSON file overriding naming conventions and thresholds
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}
