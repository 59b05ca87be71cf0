//! Dataset records and previews, with JSON persistence.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::error::{CadenceError, Result};
use crate::input::{Dataset, SourceMetadata};
use crate::validation::{DateRange, Status, ValidationReport};

/// Number of rows included in a preview.
pub const PREVIEW_ROWS: usize = 10;

/// Where a dataset came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Uploaded delimited file.
    Csv,
    /// Rows fetched from a single warehouse table.
    Warehouse,
    /// Revenue and spend tables joined in the warehouse.
    WarehouseMmm,
}

impl SourceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Csv => "csv",
            SourceType::Warehouse => "warehouse",
            SourceType::WarehouseMmm => "warehouse_mmm",
        }
    }
}

/// Everything stored about a dataset after intake.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetRecord {
    pub name: String,
    pub source_type: SourceType,
    pub row_count: usize,
    pub columns: Vec<String>,
    pub date_range_start: Option<NaiveDateTime>,
    pub date_range_end: Option<NaiveDateTime>,
    pub validation_status: Status,
    pub validation_messages: Vec<String>,
    /// Channels inferred from spend column names.
    #[serde(default)]
    pub channels: Vec<String>,
    /// Present for file uploads.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source: Option<SourceMetadata>,
}

impl DatasetRecord {
    /// Assemble a record from validation outputs.
    pub fn new(
        name: impl Into<String>,
        source_type: SourceType,
        dataset: &Dataset,
        report: ValidationReport,
        range: DateRange,
        channels: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            source_type,
            row_count: dataset.row_count(),
            columns: dataset.columns().to_vec(),
            date_range_start: range.start,
            date_range_end: range.end,
            validation_status: report.status,
            validation_messages: report.messages,
            channels,
            source: None,
        }
    }

    /// Attach file metadata.
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    /// The stored validation report.
    pub fn report(&self) -> ValidationReport {
        ValidationReport::new(self.validation_status, self.validation_messages.clone())
    }

    pub fn date_range(&self) -> DateRange {
        DateRange {
            start: self.date_range_start,
            end: self.date_range_end,
        }
    }

    /// Whether the dataset may be submitted for modeling.
    pub fn is_modelable(&self) -> bool {
        self.validation_status != Status::Error
    }

    /// Build a preview from this record and its dataset.
    pub fn preview(&self, dataset: &Dataset) -> DatasetPreview {
        self.preview_rows(dataset, PREVIEW_ROWS)
    }

    /// Build a preview with up to `limit` sample rows.
    pub fn preview_rows(&self, dataset: &Dataset, limit: usize) -> DatasetPreview {
        let sample_rows = dataset
            .head(limit)
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .map(|c| {
                        let value = row.get(c).map(|v| v.to_json()).unwrap_or_default();
                        (c.clone(), value)
                    })
                    .collect()
            })
            .collect();

        let iso = |ts: NaiveDateTime| ts.format("%Y-%m-%dT%H:%M:%S").to_string();

        DatasetPreview {
            columns: self.columns.clone(),
            row_count: self.row_count,
            date_range_start: self.date_range_start.map(iso),
            date_range_end: self.date_range_end.map(iso),
            sample_rows,
            validation_status: self.validation_status,
            validation_messages: self.validation_messages.clone(),
        }
    }

    /// Save the record to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    CadenceError::Persistence(format!(
                        "Failed to create directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }

        let file = File::create(path).map_err(|e| {
            CadenceError::Persistence(format!(
                "Failed to create file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self).map_err(|e| {
            CadenceError::Persistence(format!("Failed to serialize dataset record: {}", e))
        })?;

        tracing::debug!(path = %path.display(), name = %self.name, "saved dataset record");
        Ok(())
    }

    /// Load a record from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| {
            CadenceError::Persistence(format!(
                "Failed to open file '{}': {}",
                path.display(),
                e
            ))
        })?;

        serde_json::from_reader(BufReader::new(file)).map_err(|e| {
            CadenceError::Persistence(format!(
                "Failed to parse dataset record '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

/// What the preview screen shows for a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetPreview {
    pub columns: Vec<String>,
    pub row_count: usize,
    pub date_range_start: Option<String>,
    pub date_range_end: Option<String>,
    pub sample_rows: Vec<serde_json::Map<String, serde_json::Value>>,
    pub validation_status: Status,
    pub validation_messages: Vec<String>,
}
