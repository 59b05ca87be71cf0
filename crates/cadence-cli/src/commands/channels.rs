//! Channels command - list spend channels inferred from column names.

use std::path::PathBuf;

use colored::Colorize;

pub fn run(file: PathBuf, config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    super::require_file(&file)?;
    let intake = super::intake(config.as_deref())?;

    let result = intake.from_path(&file)?;

    if result.record.channels.is_empty() {
        println!("{}", "No spend channels detected".yellow());
    } else {
        for channel in &result.record.channels {
            println!("{}", channel);
        }
    }
    Ok(())
}
