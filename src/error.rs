//! Error types for generator construction and property execution.

use std::fmt;

/// Errors the engine itself can produce.
///
/// Everything else in the library is pure given its inputs; the only failure
/// modes are a malformed range handed to a generator constructor and a user
/// predicate that panics instead of returning a verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyError {
    /// An integer generator was asked for an empty range (`low > high`).
    InvalidRange { low: i64, high: i64 },

    /// A user predicate panicked; the payload message is captured so the
    /// failure can be reported instead of aborting the run.
    PredicateFault { message: String },
}

impl PropertyError {
    /// Create an invalid range error
    pub fn invalid_range(low: i64, high: i64) -> Self {
        Self::InvalidRange { low, high }
    }

    /// Create a predicate fault error from a captured panic message
    pub fn predicate_fault(message: impl Into<String>) -> Self {
        Self::PredicateFault {
            message: message.into(),
        }
    }
}

impl fmt::Display for PropertyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyError::InvalidRange { low, high } => {
                write!(f, "invalid range: low {} is greater than high {}", low, high)
            }
            PropertyError::PredicateFault { message } => {
                write!(f, "predicate panicked: {}", message)
            }
        }
    }
}

impl std::error::Error for PropertyError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_range_display() {
        let error = PropertyError::invalid_range(10, 3);
        assert_eq!(
            format!("{}", error),
            "invalid range: low 10 is greater than high 3"
        );
    }

    #[test]
    fn test_predicate_fault_display() {
        let error = PropertyError::predicate_fault("index out of bounds");
        assert_eq!(
            format!("{}", error),
            "predicate panicked: index out of bounds"
        );
    }
}
