//! Validation engine for marketing-mix datasets.

mod cadence;
mod report;
mod severity;
mod validator;

pub use cadence::{CadenceCheck, check_cadence};
pub use report::{DateRange, PASSED_MESSAGE, ValidationReport};
pub use severity::Status;
pub use validator::{DataValidator, date_range, detected_channels, validate};
