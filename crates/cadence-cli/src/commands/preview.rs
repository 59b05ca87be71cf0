//! Preview command - show sample rows with the stored validation outcome.

use std::path::PathBuf;

pub fn run(
    file: PathBuf,
    rows: usize,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    super::require_file(&file)?;
    let intake = super::intake(config.as_deref())?;

    let result = intake.from_path(&file)?;
    let preview = result.record.preview_rows(&result.dataset, rows);

    println!("{}", serde_json::to_string_pretty(&preview)?);
    Ok(())
}
