//! Column role lookup by naming convention.

use std::collections::HashMap;

use crate::config::ValidatorConfig;

/// Case-insensitive view over a dataset's column names.
///
/// Lookup is an exact match on the lowercased name; candidate order is the
/// priority order and the first hit wins. When two columns fold to the same
/// lowercase name, the later one owns the slot.
pub struct ColumnLookup<'a> {
    by_lower: HashMap<String, &'a str>,
}

impl<'a> ColumnLookup<'a> {
    pub fn new(columns: &'a [String]) -> Self {
        let by_lower = columns
            .iter()
            .map(|c| (c.to_lowercase(), c.as_str()))
            .collect();
        Self { by_lower }
    }

    /// Return the original name of the first candidate present.
    pub fn find<S: AsRef<str>>(&self, candidates: &[S]) -> Option<&'a str> {
        candidates
            .iter()
            .find_map(|name| self.by_lower.get(&name.as_ref().to_lowercase()).copied())
    }
}

/// Find the date column using the configured candidates.
pub fn detect_date_column<'a>(columns: &'a [String], config: &ValidatorConfig) -> Option<&'a str> {
    ColumnLookup::new(columns).find(&config.date_columns)
}

/// Find the revenue column using the configured candidates.
pub fn detect_revenue_column<'a>(
    columns: &'a [String],
    config: &ValidatorConfig,
) -> Option<&'a str> {
    ColumnLookup::new(columns).find(&config.revenue_columns)
}

/// Whether a column follows a spend naming convention.
///
/// The marker is matched case-insensitively, the suffix is not.
pub fn is_spend_column(name: &str, config: &ValidatorConfig) -> bool {
    has_marker(name, config) || name.ends_with(&config.spend_suffix)
}

fn has_marker(name: &str, config: &ValidatorConfig) -> bool {
    name.to_lowercase()
        .contains(&config.spend_marker.to_lowercase())
}

/// All spend columns, in column order.
pub fn spend_columns<'a>(columns: &'a [String], config: &ValidatorConfig) -> Vec<&'a str> {
    columns
        .iter()
        .map(String::as_str)
        .filter(|c| is_spend_column(c, config))
        .collect()
}

/// Channel name for a spend column, or `None` for other columns.
///
/// Marker columns have every literal `spend_` and then `_spend` removed;
/// the removal is case-sensitive, so `Meta_Spend` is returned unchanged.
/// Suffix columns lose the suffix.
pub fn channel_name(name: &str, config: &ValidatorConfig) -> Option<String> {
    if has_marker(name, config) {
        let prefix = format!("{}_", config.spend_marker);
        let suffix = format!("_{}", config.spend_marker);
        Some(name.replace(&prefix, "").replace(&suffix, ""))
    } else {
        name.strip_suffix(config.spend_suffix.as_str())
            .map(str::to_string)
    }
}
