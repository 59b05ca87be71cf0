//! Column role and timestamp inference.

mod columns;
mod timestamps;

pub use columns::{
    ColumnLookup, channel_name, detect_date_column, detect_revenue_column, is_spend_column,
    spend_columns,
};
pub use timestamps::{UnparseableDate, parse_column, parse_timestamp, to_timestamp};
