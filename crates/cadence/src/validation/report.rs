//! Validation report and date range outputs.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::severity::Status;

/// Message emitted when no check triggers.
pub const PASSED_MESSAGE: &str = "Data validation passed";

/// Severity plus the ordered findings shown to the uploading user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub status: Status,
    pub messages: Vec<String>,
}

impl ValidationReport {
    pub fn new(status: Status, messages: Vec<String>) -> Self {
        Self { status, messages }
    }

    /// Whether the dataset must not be handed to modeling.
    pub fn is_blocking(&self) -> bool {
        self.status == Status::Error
    }

    /// True when nothing triggered.
    pub fn passed(&self) -> bool {
        self.status == Status::Valid && self.messages.iter().all(|m| m == PASSED_MESSAGE)
    }
}

/// First and last timestamp of the date column, when one could be read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn is_known(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}
