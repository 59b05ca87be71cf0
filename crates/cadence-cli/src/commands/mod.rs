//! CLI command implementations.

pub mod channels;
pub mod preview;
pub mod validate;

use std::path::Path;

use cadence::{Intake, IntakeConfig, ValidatorConfig};

/// Build an intake, loading validator overrides when given.
pub fn intake(config: Option<&Path>) -> Result<Intake, Box<dyn std::error::Error>> {
    let validator = match config {
        Some(path) => {
            let loaded = ValidatorConfig::load(path)?;
            tracing::debug!(path = %path.display(), "loaded validator config");
            loaded
        }
        None => ValidatorConfig::default(),
    };
    Ok(Intake::with_config(IntakeConfig {
        validator,
        ..IntakeConfig::default()
    }))
}

/// Validate input file exists.
pub fn require_file(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}
