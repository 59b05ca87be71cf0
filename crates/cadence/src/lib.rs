//! cadence: validation and column inference for marketing-mix datasets.
//!
//! An uploaded spend/revenue time series is checked before it is handed to
//! the modeling toolkit. The validator infers the date and revenue columns
//! from naming conventions, looks for missing values, duplicate dates and
//! holes in the weekly cadence, and grades the result as `valid`, `warning`
//! or `error`.
//!
//! # Core Principles
//!
//! - **Never fails**: validation always returns a report; problems are findings
//! - **Deterministic**: the same dataset always yields the same ordered messages
//! - **Max severity wins**: a later check can raise the status, never lower it
//!
//! # Example
//!
//! ```no_run
//! use cadence::Intake;
//!
//! let result = Intake::new().from_path("brand_weekly.csv").unwrap();
//!
//! println!("Status: {}", result.record.validation_status);
//! for message in &result.record.validation_messages {
//!     println!("  {}", message);
//! }
//! ```

pub mod config;
pub mod error;
pub mod inference;
pub mod input;
pub mod intake;
pub mod record;
pub mod validation;

pub use config::ValidatorConfig;
pub use error::{CadenceError, Result};
pub use input::{Dataset, Parser, ParserConfig, Row, SourceMetadata, Value};
pub use intake::{Intake, IntakeConfig, IntakeResult};
pub use record::{DatasetPreview, DatasetRecord, PREVIEW_ROWS, SourceType};
pub use validation::{DataValidator, DateRange, Status, ValidationReport};
