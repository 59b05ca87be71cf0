//! The dataset validation pipeline.

use std::collections::HashSet;

use chrono::NaiveDateTime;

use crate::config::ValidatorConfig;
use crate::inference::{
    channel_name, detect_date_column, detect_revenue_column, parse_column, spend_columns,
};
use crate::input::{Dataset, Value};

use super::cadence::{CadenceCheck, check_cadence};
use super::report::{DateRange, PASSED_MESSAGE, ValidationReport};
use super::severity::Status;

const NO_DATE_MESSAGE: &str = "No date column detected. Expected: date, week, week_start";
const NO_REVENUE_MESSAGE: &str =
    "No revenue column detected. Expected: revenue, sales, conversions";
const NO_SPEND_MESSAGE: &str =
    "No spend columns detected (expected columns containing 'spend' or ending with '_S')";

/// Validates one dataset for modeling.
///
/// The validator borrows the dataset mutably: on success the detected date
/// column is rewritten in place as parsed timestamps. Callers that need the
/// original values must clone the dataset first.
///
/// # Example
///
/// ```
/// use cadence::{DataValidator, Dataset, Status};
///
/// let mut dataset = Dataset::default();
/// let report = DataValidator::new(&mut dataset).validate();
///
/// assert_eq!(report.status, Status::Error);
/// assert_eq!(report.messages, vec!["Dataset is empty"]);
/// ```
pub struct DataValidator<'a> {
    dataset: &'a mut Dataset,
    config: ValidatorConfig,
    date_column: Option<String>,
    messages: Vec<String>,
}

impl<'a> DataValidator<'a> {
    /// Create a validator with the default naming conventions.
    pub fn new(dataset: &'a mut Dataset) -> Self {
        Self::with_config(dataset, ValidatorConfig::default())
    }

    pub fn with_config(dataset: &'a mut Dataset, config: ValidatorConfig) -> Self {
        Self {
            dataset,
            config,
            date_column: None,
            messages: Vec::new(),
        }
    }

    /// The date column found by the last `validate` or `date_range` call.
    pub fn date_column(&self) -> Option<&str> {
        self.date_column.as_deref()
    }

    /// Run every check in order and return the report.
    ///
    /// Calling this again on the same (now parsed) dataset gives the same
    /// report.
    pub fn validate(&mut self) -> ValidationReport {
        self.messages.clear();
        self.date_column = None;
        let mut status = Status::Valid;

        let rows = self.dataset.row_count();
        if rows == 0 {
            self.emit("Dataset is empty".to_string());
            return self.finish(Status::Error);
        }

        if rows < self.config.min_rows {
            self.emit(format!(
                "Dataset has {} rows, minimum {} required",
                rows, self.config.min_rows
            ));
            status.raise(Status::Warning);
        }

        self.date_column = detect_date_column(self.dataset.columns(), &self.config)
            .map(str::to_string);
        match self.date_column.clone() {
            None => {
                self.emit(NO_DATE_MESSAGE.to_string());
                status.raise(Status::Error);
            }
            Some(column) => match parse_column(self.dataset.column_values(&column)) {
                Ok(parsed) => self.dataset.replace_column(&column, parsed),
                Err(e) => {
                    tracing::debug!(column = %column, error = %e, "date column not parseable");
                    self.emit(format!("Could not parse '{}' as dates", column));
                    status.raise(Status::Error);
                }
            },
        }

        if detect_revenue_column(self.dataset.columns(), &self.config).is_none() {
            self.emit(NO_REVENUE_MESSAGE.to_string());
            status.raise(Status::Warning);
        }

        let missing: Vec<String> = self
            .dataset
            .columns()
            .iter()
            .filter_map(|column| {
                let count = self.dataset.missing_count(column);
                (count > 0).then(|| format!("Column '{}' has {} missing values", column, count))
            })
            .collect();
        if !missing.is_empty() {
            missing.into_iter().for_each(|m| self.emit(m));
            status.raise(Status::Warning);
        }

        if spend_columns(self.dataset.columns(), &self.config).is_empty() {
            self.emit(NO_SPEND_MESSAGE.to_string());
            status.raise(Status::Warning);
        }

        if let Some(column) = self.date_column.clone() {
            let duplicates = count_duplicates(self.dataset.column_values(&column));
            if duplicates > 0 {
                self.emit(format!("Found {} duplicate dates", duplicates));
                status.raise(Status::Warning);
            }

            if status != Status::Error {
                match check_cadence(self.dataset.column_values(&column), &self.config) {
                    CadenceCheck::NotWeekly { median_days } => {
                        self.emit(format!(
                            "Data may not be weekly (median interval: {} days)",
                            median_days
                        ));
                        status.raise(Status::Warning);
                    }
                    CadenceCheck::Weekly { gaps } if gaps > 0 => {
                        self.emit(format!("Found {} gaps in weekly data", gaps));
                        status.raise(Status::Warning);
                    }
                    CadenceCheck::Weekly { .. } => {}
                    CadenceCheck::Skip => {
                        tracing::debug!(column = %column, "cadence check skipped");
                    }
                }
            }
        }

        if self.messages.is_empty() {
            self.messages.push(PASSED_MESSAGE.to_string());
        }

        self.finish(status)
    }

    /// First and last timestamp of the date column.
    ///
    /// Detects the date column if no earlier call did. Returns an unknown
    /// range instead of failing when the column is absent or unreadable.
    pub fn date_range(&mut self) -> DateRange {
        let cached = self
            .date_column
            .as_deref()
            .is_some_and(|c| self.dataset.has_column(c));
        if !cached {
            self.date_column = detect_date_column(self.dataset.columns(), &self.config)
                .map(str::to_string);
        }

        match &self.date_column {
            Some(column) => column_range(self.dataset, column),
            None => DateRange::default(),
        }
    }

    /// Channel names derived from spend columns, in column order.
    pub fn detected_channels(&self) -> Vec<String> {
        detected_channels(self.dataset, &self.config)
    }

    fn emit(&mut self, message: String) {
        tracing::debug!(finding = %message, "validation finding");
        self.messages.push(message);
    }

    fn finish(&self, status: Status) -> ValidationReport {
        tracing::info!(
            status = %status,
            rows = self.dataset.row_count(),
            findings = self.messages.len(),
            date_column = self.date_column.as_deref().unwrap_or("-"),
            "validated dataset"
        );
        ValidationReport::new(status, self.messages.clone())
    }
}

/// Validate a dataset with the default conventions.
pub fn validate(dataset: &mut Dataset) -> ValidationReport {
    DataValidator::new(dataset).validate()
}

/// Date range of a dataset with the default conventions, leaving it untouched.
pub fn date_range(dataset: &Dataset) -> DateRange {
    let config = ValidatorConfig::default();
    match detect_date_column(dataset.columns(), &config) {
        Some(column) => column_range(dataset, column),
        None => DateRange::default(),
    }
}

/// Channel names derived from spend columns, in column order.
pub fn detected_channels(dataset: &Dataset, config: &ValidatorConfig) -> Vec<String> {
    dataset
        .columns()
        .iter()
        .filter_map(|c| channel_name(c, config))
        .collect()
}

fn column_range(dataset: &Dataset, column: &str) -> DateRange {
    let Ok(parsed) = parse_column(dataset.column_values(column)) else {
        return DateRange::default();
    };
    let stamps: Vec<NaiveDateTime> = parsed.iter().filter_map(Value::as_timestamp).collect();
    match (stamps.iter().min(), stamps.iter().max()) {
        (Some(start), Some(end)) => DateRange::new(*start, *end),
        _ => DateRange::default(),
    }
}

/// Hashable identity of a cell for duplicate counting.
#[derive(PartialEq, Eq, Hash)]
enum CellKey<'a> {
    Missing,
    Text(&'a str),
    Number(u64),
    Timestamp(NaiveDateTime),
}

impl<'a> From<&'a Value> for CellKey<'a> {
    fn from(value: &'a Value) -> Self {
        match value {
            Value::Missing => CellKey::Missing,
            Value::Text(s) => CellKey::Text(s),
            // -0.0 and 0.0 are the same date value.
            Value::Number(n) if *n == 0.0 => CellKey::Number(0.0f64.to_bits()),
            Value::Number(n) => CellKey::Number(n.to_bits()),
            Value::Timestamp(ts) => CellKey::Timestamp(*ts),
        }
    }
}

/// Count values equal to an earlier value in the column.
fn count_duplicates<'a>(values: impl Iterator<Item = &'a Value>) -> usize {
    let mut seen = HashSet::new();
    values.filter(|v| !seen.insert(CellKey::from(*v))).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Row;
    use chrono::{Duration, NaiveDate};

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    /// Weekly rows with date, revenue and one spend column.
    fn weekly(n: usize, step_days: i64) -> Dataset {
        let rows: Vec<Row> = (0..n)
            .map(|i| {
                let date = start() + Duration::days(step_days * i as i64);
                let mut row = Row::new();
                row.insert("date".into(), date.format("%Y-%m-%d").to_string().into());
                row.insert("revenue".into(), Value::Number(1000.0 + i as f64));
                row.insert("spend_meta".into(), Value::Number(100.0));
                row
            })
            .collect();
        Dataset::from_rows(rows)
    }

    #[test]
    fn test_empty_dataset() {
        let mut ds = Dataset::new(vec!["date".into(), "revenue".into()]);
        let report = validate(&mut ds);
        assert_eq!(report.status, Status::Error);
        assert_eq!(report.messages, vec!["Dataset is empty"]);
    }

    #[test]
    fn test_clean_dataset_passes() {
        let mut ds = weekly(60, 7);
        let report = validate(&mut ds);
        assert_eq!(report.status, Status::Valid);
        assert_eq!(report.messages, vec![PASSED_MESSAGE]);
        assert!(report.passed());
    }

    #[test]
    fn test_date_column_parsed_in_place() {
        let mut ds = weekly(3, 7);
        let mut validator = DataValidator::new(&mut ds);
        validator.validate();
        assert_eq!(validator.date_column(), Some("date"));
        assert_eq!(ds.value(0, "date"), &Value::Timestamp(start()));
        assert_eq!(ds.value(0, "revenue"), &Value::Number(1000.0));
    }

    #[test]
    fn test_validate_twice_is_stable() {
        let mut ds = weekly(10, 7);
        let mut validator = DataValidator::new(&mut ds);
        let first = validator.validate();
        let second = validator.validate();
        assert_eq!(first, second);
    }

    #[test]
    fn test_short_series_with_missing_revenue() {
        let mut ds = weekly(10, 7);
        let mut rows = ds.rows().to_vec();
        rows[3].insert("revenue".into(), Value::Missing);
        rows.iter_mut().for_each(|r| {
            r.shift_remove("spend_meta");
        });
        ds = Dataset::with_rows(vec!["date".into(), "revenue".into()], rows);

        let report = validate(&mut ds);
        assert_eq!(report.status, Status::Warning);
        assert_eq!(
            report.messages,
            vec![
                "Dataset has 10 rows, minimum 52 required".to_string(),
                "Column 'revenue' has 1 missing values".to_string(),
                NO_SPEND_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn test_missing_date_column_is_error() {
        let mut ds = weekly(60, 7);
        let rows: Vec<Row> = ds
            .rows()
            .iter()
            .map(|r| {
                let mut r = r.clone();
                let value = r.shift_remove("date").unwrap();
                r.insert("day".into(), value);
                r
            })
            .collect();
        ds = Dataset::from_rows(rows);

        let report = validate(&mut ds);
        assert_eq!(report.status, Status::Error);
        assert_eq!(report.messages, vec![NO_DATE_MESSAGE]);
    }

    #[test]
    fn test_unparseable_dates_are_error_and_skip_cadence() {
        let mut ds = weekly(60, 1);
        let mut rows = ds.rows().to_vec();
        rows[5].insert("date".into(), "whenever".into());
        ds = Dataset::from_rows(rows);

        let report = validate(&mut ds);
        assert_eq!(report.status, Status::Error);
        assert_eq!(report.messages, vec!["Could not parse 'date' as dates"]);
        assert_eq!(ds.value(0, "date"), &Value::from("2023-01-02"));
    }

    #[test]
    fn test_no_revenue_does_not_downgrade_error() {
        let mut ds = Dataset::from_rows(vec![Row::from([(
            "spend_tv".to_string(),
            Value::Number(1.0),
        )])]);
        let report = validate(&mut ds);
        assert_eq!(report.status, Status::Error);
        assert_eq!(
            report.messages,
            vec![
                "Dataset has 1 rows, minimum 52 required".to_string(),
                NO_DATE_MESSAGE.to_string(),
                NO_REVENUE_MESSAGE.to_string(),
            ]
        );
    }

    #[test]
    fn test_duplicate_dates() {
        let mut ds = weekly(60, 7);
        let mut rows = ds.rows().to_vec();
        let copy = rows[10].get("date").cloned().unwrap();
        rows[11].insert("date".into(), copy);
        ds = Dataset::from_rows(rows);

        let report = validate(&mut ds);
        assert_eq!(report.status, Status::Warning);
        assert!(report.messages.contains(&"Found 1 duplicate dates".to_string()));
    }

    #[test]
    fn test_daily_data_not_weekly() {
        let mut ds = weekly(60, 1);
        let report = validate(&mut ds);
        assert_eq!(
            report.messages,
            vec!["Data may not be weekly (median interval: 1 days)"]
        );
        assert_eq!(report.status, Status::Warning);
    }

    #[test]
    fn test_gaps_reported() {
        let mut ds = weekly(60, 7);
        let mut rows = ds.rows().to_vec();
        rows.remove(20);
        rows.remove(40);
        ds = Dataset::from_rows(rows);

        let report = validate(&mut ds);
        assert_eq!(report.messages, vec!["Found 2 gaps in weekly data"]);
    }

    #[test]
    fn test_date_range() {
        let mut ds = weekly(5, 7);
        let mut validator = DataValidator::new(&mut ds);
        let range = validator.date_range();
        assert_eq!(range, DateRange::new(start(), start() + Duration::days(28)));
    }

    #[test]
    fn test_date_range_unknown_on_bad_values() {
        let mut ds = Dataset::from_rows(vec![Row::from([("week".to_string(), Value::from("?"))])]);
        assert_eq!(date_range(&ds), DateRange::default());
        assert_eq!(DataValidator::new(&mut ds).date_range(), DateRange::default());
    }

    #[test]
    fn test_detected_channels() {
        let columns = ["date", "revenue", "spend_meta", "google_S"]
            .map(String::from)
            .to_vec();
        let mut ds = Dataset::new(columns);
        let validator = DataValidator::new(&mut ds);
        assert_eq!(validator.detected_channels(), vec!["meta", "google"]);
    }

    #[test]
    fn test_count_duplicates_counts_repeats_only() {
        let values = vec![
            Value::from("a"),
            Value::from("a"),
            Value::from("a"),
            Value::Missing,
            Value::Missing,
            Value::Number(0.0),
            Value::Number(-0.0),
        ];
        assert_eq!(count_duplicates(values.iter()), 4);
    }
}
