//! Intake: turn an uploaded file or fetched rows into a validated record.

use std::path::Path;

use crate::config::ValidatorConfig;
use crate::error::{CadenceError, Result};
use crate::input::{Dataset, Parser, ParserConfig};
use crate::record::{DatasetRecord, SourceType};
use crate::validation::DataValidator;

/// Configuration for dataset intake.
#[derive(Debug, Clone)]
pub struct IntakeConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Validator naming conventions and thresholds.
    pub validator: ValidatorConfig,
    /// Required upload filename suffix (case-sensitive).
    pub upload_suffix: String,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            validator: ValidatorConfig::default(),
            upload_suffix: ".csv".to_string(),
        }
    }
}

/// A validated dataset and the record describing it.
///
/// The dataset's date column holds parsed timestamps when validation
/// could read it.
#[derive(Debug, Clone)]
pub struct IntakeResult {
    pub record: DatasetRecord,
    pub dataset: Dataset,
}

/// Runs parsing and validation the way the upload handlers do.
pub struct Intake {
    config: IntakeConfig,
    parser: Parser,
}

impl Intake {
    pub fn new() -> Self {
        Self::with_config(IntakeConfig::default())
    }

    pub fn with_config(config: IntakeConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &IntakeConfig {
        &self.config
    }

    /// Read, validate and describe an uploaded file.
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<IntakeResult> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        self.check_upload_name(&name)?;

        let (dataset, source) = self.parser.parse_file(path)?;
        let mut result = self.from_dataset(name, SourceType::Csv, dataset);
        result.record = result.record.with_source(source);
        Ok(result)
    }

    /// Validate an upload held in memory.
    pub fn from_bytes(&self, name: &str, bytes: &[u8]) -> Result<IntakeResult> {
        self.check_upload_name(name)?;
        let dataset = self.parser.parse_bytes(bytes)?;
        Ok(self.from_dataset(name, SourceType::Csv, dataset))
    }

    /// Validate rows that arrived already tabulated (warehouse queries).
    pub fn from_dataset(
        &self,
        name: impl Into<String>,
        source_type: SourceType,
        mut dataset: Dataset,
    ) -> IntakeResult {
        let name = name.into();
        let mut validator = DataValidator::with_config(&mut dataset, self.config.validator.clone());
        let report = validator.validate();
        let range = validator.date_range();
        let channels = validator.detected_channels();

        tracing::info!(
            name = %name,
            source_type = source_type.as_str(),
            status = %report.status,
            channels = channels.len(),
            "dataset intake complete"
        );

        let record = DatasetRecord::new(name, source_type, &dataset, report, range, channels);
        IntakeResult { record, dataset }
    }

    fn check_upload_name(&self, name: &str) -> Result<()> {
        if name.ends_with(&self.config.upload_suffix) {
            Ok(())
        } else {
            Err(CadenceError::UnsupportedFormat(
                "Only CSV files are supported".to_string(),
            ))
        }
    }
}

impl Default for Intake {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::Status;

    #[test]
    fn test_rejects_non_csv_name() {
        let intake = Intake::new();
        let err = intake.from_bytes("data.xlsx", b"date\n2024-01-01\n").unwrap_err();
        assert!(matches!(err, CadenceError::UnsupportedFormat(_)));
        assert!(intake.from_bytes("DATA.CSV", b"date\n").is_err());
    }

    #[test]
    fn test_header_only_upload_is_empty_error() {
        let result = Intake::new().from_bytes("empty.csv", b"date,revenue\n").unwrap();
        assert_eq!(result.record.validation_status, Status::Error);
        assert_eq!(result.record.validation_messages, vec!["Dataset is empty"]);
        assert_eq!(result.record.row_count, 0);
        assert!(!result.record.date_range().is_known());
    }

    #[test]
    fn test_from_bytes_fills_record() {
        let csv = b"Week,sales,tv_S,search_spend\n2024-01-01,10,1,2\n2024-01-08,11,1,2\n";
        let result = Intake::new().from_bytes("brand.csv", csv).unwrap();
        let record = &result.record;

        assert_eq!(record.name, "brand.csv");
        assert_eq!(record.source_type, SourceType::Csv);
        assert_eq!(record.columns, vec!["Week", "sales", "tv_S", "search_spend"]);
        assert_eq!(record.channels, vec!["tv", "search"]);
        assert_eq!(record.validation_status, Status::Warning);
        assert!(record.date_range().is_known());
        assert!(record.source.is_none());
    }
}
