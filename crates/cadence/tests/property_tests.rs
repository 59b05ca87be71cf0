//! Property-based tests for the validator.
//!
//! These tests use proptest to generate random datasets and verify that
//! validation maintains its invariants under all conditions.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: validation never crashes on any dataset shape
//! 2. **Determinism**: revalidating the same dataset gives the same report
//! 3. **Priority**: date column inference follows the candidate order
//! 4. **Invariants**: clean weekly data always passes
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p cadence --test property_tests
//! PROPTEST_CASES=10000 cargo test -p cadence --test property_tests
//! ```

use chrono::{Duration, NaiveDate};
use proptest::prelude::*;

use cadence::validation::{date_range, validate};
use cadence::{DataValidator, Dataset, Row, Status, Value};

// =============================================================================
// Test Strategies
// =============================================================================

/// Arbitrary cell values, including date-looking text.
fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Missing),
        any::<f64>().prop_map(Value::Number),
        "[a-zA-Z0-9_\\-\\./ ]{0,20}".prop_map(Value::Text),
        (2000i32..2030, 1u32..13, 1u32..29).prop_map(|(y, m, d)| {
            Value::Text(format!("{:04}-{:02}-{:02}", y, m, d))
        }),
    ]
}

/// Column names drawn from the conventions plus noise.
fn column_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("date".to_string()),
        Just("Week".to_string()),
        Just("revenue".to_string()),
        Just("spend_meta".to_string()),
        Just("tv_S".to_string()),
        "[a-z_]{1,12}",
    ]
}

/// Random datasets of up to 80 rows.
fn dataset() -> impl Strategy<Value = Dataset> {
    (
        prop::collection::btree_set(column_name(), 1..6),
        0usize..80,
    )
        .prop_flat_map(|(columns, n)| {
            let columns: Vec<String> = columns.into_iter().collect();
            let width = columns.len();
            prop::collection::vec(prop::collection::vec(cell(), width), n).prop_map(move |cells| {
                let rows = cells
                    .into_iter()
                    .map(|values| columns.iter().cloned().zip(values).collect::<Row>())
                    .collect();
                Dataset::with_rows(columns.clone(), rows)
            })
        })
}

/// Clean weekly dataset: `n` rows, 7 days apart, revenue and spend present.
fn clean_weekly(n: usize, start_offset: i64) -> Dataset {
    let start = NaiveDate::from_ymd_opt(2020, 1, 6).unwrap() + Duration::days(start_offset);
    let rows = (0..n)
        .map(|i| {
            let mut row = Row::new();
            let d = start + Duration::days(7 * i as i64);
            row.insert("date".into(), Value::from(d.format("%Y-%m-%d").to_string()));
            row.insert("revenue".into(), Value::Number(i as f64 * 3.5));
            row.insert("search_spend".into(), Value::Number(12.0));
            row
        })
        .collect();
    Dataset::from_rows(rows)
}

// =============================================================================
// Validator Properties
// =============================================================================

mod validator_properties {
    use super::*;

    proptest! {
        /// Validation never panics
        #[test]
        fn never_panics(mut ds in dataset()) {
            let _ = validate(&mut ds);
            let _ = date_range(&ds);
        }

        /// Revalidating the parsed dataset gives the same report
        #[test]
        fn validation_is_idempotent(mut ds in dataset()) {
            let mut validator = DataValidator::new(&mut ds);
            let first = validator.validate();
            let second = validator.validate();
            prop_assert_eq!(first, second);
        }

        /// Empty datasets always report exactly one error
        #[test]
        fn empty_is_error(columns in prop::collection::vec(column_name(), 0..5)) {
            let mut ds = Dataset::new(columns);
            let report = validate(&mut ds);
            prop_assert_eq!(report.status, Status::Error);
            prop_assert_eq!(report.messages, vec!["Dataset is empty".to_string()]);
        }

        /// Reports never come back without a message
        #[test]
        fn messages_never_empty(mut ds in dataset()) {
            let report = validate(&mut ds);
            prop_assert!(!report.messages.is_empty());
        }

        /// Error status only comes from emptiness or the date column
        #[test]
        fn error_only_for_structural_defects(mut ds in dataset()) {
            let report = validate(&mut ds);
            if report.status == Status::Error {
                let structural = report.messages.iter().any(|m| {
                    m == "Dataset is empty"
                        || m.starts_with("No date column detected")
                        || m.starts_with("Could not parse")
                });
                prop_assert!(structural);
            }
        }

        /// Clean weekly data of at least a year always passes
        #[test]
        fn clean_weekly_passes(n in 52usize..150, offset in 0i64..365) {
            let mut ds = clean_weekly(n, offset);
            let report = validate(&mut ds);
            prop_assert_eq!(report.status, Status::Valid);
            prop_assert_eq!(report.messages, vec!["Data validation passed".to_string()]);
        }

        /// Date range spans the first and last generated week
        #[test]
        fn date_range_matches_bounds(n in 1usize..100) {
            let ds = clean_weekly(n, 0);
            let range = date_range(&ds);
            let start = NaiveDate::from_ymd_opt(2020, 1, 6).unwrap();
            prop_assert_eq!(range.start.map(|d| d.date()), Some(start));
            prop_assert_eq!(
                range.end.map(|d| d.date()),
                Some(start + Duration::days(7 * (n as i64 - 1)))
            );
        }
    }
}

// =============================================================================
// Inference Properties
// =============================================================================

mod inference_properties {
    use super::*;
    use cadence::ValidatorConfig;
    use cadence::inference::detect_date_column;

    const CANDIDATES: &[&str] = &["date", "week", "week_start", "week_date"];

    /// Randomly upper-case some characters.
    fn recase(name: &str, mask: &[bool]) -> String {
        name.chars()
            .zip(mask.iter().cycle())
            .map(|(c, &upper)| if upper { c.to_ascii_uppercase() } else { c })
            .collect()
    }

    proptest! {
        /// The highest-priority candidate present is selected, whatever its case
        #[test]
        fn date_priority_respected(
            present in prop::collection::vec(any::<bool>(), 4)
                .prop_filter("at least one candidate", |v| v.iter().any(|&b| b)),
            mask in prop::collection::vec(any::<bool>(), 1..8),
            noise in prop::collection::vec("[a-z]{3,8}_x", 0..3),
        ) {
            let indices: Vec<usize> = (0..4).filter(|&i| present[i]).collect();
            let mut columns: Vec<String> = noise;
            for &i in indices.iter().rev() {
                columns.push(recase(CANDIDATES[i], &mask));
            }
            let expected = recase(CANDIDATES[indices[0]], &mask);

            let found = detect_date_column(&columns, &ValidatorConfig::default());
            prop_assert_eq!(found, Some(expected.as_str()));
        }
    }
}
