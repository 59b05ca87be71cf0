//! cadence CLI - validate marketing-mix datasets.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "cadence=debug" } else { "cadence=warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let result = match cli.command {
        Commands::Validate {
            file,
            output,
            config,
            json,
        } => commands::validate::run(file, output, config, json, cli.verbose),

        Commands::Preview { file, rows, config } => commands::preview::run(file, rows, config),

        Commands::Channels { file, config } => commands::channels::run(file, config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
