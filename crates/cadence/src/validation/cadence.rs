//! Weekly cadence and gap detection over a date column.

use chrono::NaiveDateTime;

use crate::config::ValidatorConfig;
use crate::inference::to_timestamp;
use crate::input::Value;

const NANOS_PER_DAY: i128 = 86_400 * 1_000_000_000;

/// Outcome of the cadence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CadenceCheck {
    /// The median interval is outside the weekly window; gaps were not counted.
    NotWeekly { median_days: i64 },
    /// Weekly data with `gaps` intervals longer than the gap threshold.
    Weekly { gaps: usize },
    /// Nothing to judge: fewer than two distinct timestamps, an unreadable
    /// value, or an interval that does not fit the arithmetic.
    Skip,
}

/// Judge the cadence of a date column.
///
/// Missing cells are ignored. The median of an even number of intervals is
/// the mean of the two middle ones, and its day count is rounded down.
pub fn check_cadence<'a>(
    values: impl Iterator<Item = &'a Value>,
    config: &ValidatorConfig,
) -> CadenceCheck {
    let mut stamps: Vec<NaiveDateTime> = Vec::new();
    for value in values {
        match to_timestamp(value) {
            Some(Value::Timestamp(ts)) => stamps.push(ts),
            Some(_) => {}
            None => return CadenceCheck::Skip,
        }
    }
    stamps.sort();

    let distinct = match stamps.first() {
        Some(_) => 1 + stamps.windows(2).filter(|w| w[0] != w[1]).count(),
        None => 0,
    };
    if distinct < 2 {
        return CadenceCheck::Skip;
    }

    let mut diffs: Vec<i128> = Vec::with_capacity(stamps.len() - 1);
    for pair in stamps.windows(2) {
        match pair[1].signed_duration_since(pair[0]).num_nanoseconds() {
            Some(n) => diffs.push(n as i128),
            None => return CadenceCheck::Skip,
        }
    }

    let mut sorted = diffs.clone();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;
    let median = if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2
    };
    let median_days = median.div_euclid(NANOS_PER_DAY) as i64;

    if median_days < config.weekly_min_days || median_days > config.weekly_max_days {
        return CadenceCheck::NotWeekly { median_days };
    }

    let threshold = config.gap_days as i128 * NANOS_PER_DAY;
    let gaps = diffs.iter().filter(|&&d| d > threshold).count();

    CadenceCheck::Weekly { gaps }
}
