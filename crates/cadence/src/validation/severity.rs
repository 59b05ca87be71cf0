//! Overall validation severity.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a validation run, ordered `Valid < Warning < Error`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// No problems found.
    #[default]
    Valid,
    /// Quality issues; the dataset can still be modeled.
    Warning,
    /// The dataset cannot be processed.
    Error,
}

impl Status {
    /// Raise to `level` if it is more severe. Never lowers.
    pub fn raise(&mut self, level: Status) {
        *self = (*self).max(level);
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Valid => "valid",
            Status::Warning => "warning",
            Status::Error => "error",
        }
    }

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Status::Valid => "Valid",
            Status::Warning => "Warning",
            Status::Error => "Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_ordering() {
        assert!(Status::Valid < Status::Warning);
        assert!(Status::Warning < Status::Error);
    }

    #[test]
    fn test_raise_never_lowers() {
        let mut status = Status::Valid;
        status.raise(Status::Error);
        status.raise(Status::Warning);
        assert_eq!(status, Status::Error);

        let mut status = Status::Warning;
        status.raise(Status::Valid);
        assert_eq!(status, Status::Warning);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Status::Warning).unwrap(), "\"warning\"");
    }
}
