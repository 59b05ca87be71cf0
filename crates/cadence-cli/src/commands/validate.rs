//! Validate command - run the validator and print or save the report.

use std::path::PathBuf;

use cadence::Status;
use colored::Colorize;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    config: Option<PathBuf>,
    json_output: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    super::require_file(&file)?;
    let intake = super::intake(config.as_deref())?;

    if !json_output {
        println!(
            "{} {}",
            "Validating".cyan().bold(),
            file.display().to_string().white()
        );
    }

    let result = intake.from_path(&file)?;
    let record = &result.record;

    if json_output {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        if verbose {
            println!();
            println!("{}", "Columns:".yellow().bold());
            for column in &record.columns {
                println!("  {}", column);
            }
        }

        println!();
        println!(
            "{} rows, {} columns",
            record.row_count.to_string().white().bold(),
            record.columns.len()
        );
        match (record.date_range_start, record.date_range_end) {
            (Some(start), Some(end)) => {
                println!("Date range: {} to {}", start.date(), end.date())
            }
            _ => println!("Date range: {}", "unknown".dimmed()),
        }
        if !record.channels.is_empty() {
            println!("Channels: {}", record.channels.join(", "));
        }

        println!();
        let status = match record.validation_status {
            Status::Valid => record.validation_status.label().green().bold(),
            Status::Warning => record.validation_status.label().yellow().bold(),
            Status::Error => record.validation_status.label().red().bold(),
        };
        println!("Status: {}", status);
        for message in &record.validation_messages {
            println!("  - {}", message);
        }
    }

    if let Some(path) = output {
        record.save(&path)?;
        if !json_output {
            println!();
            println!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
    }

    if record.report().is_blocking() {
        return Err("dataset cannot be used for modeling".into());
    }

    Ok(())
}
