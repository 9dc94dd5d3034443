//! Error types for cabin meter domain rules.

use chrono::NaiveDate;

use crate::ids::UsageId;

/// Result type for domain operations.
pub type Result<T> = std::result::Result<T, MeterError>;

/// Broad class of a [`MeterError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field-level or cross-field rule was violated.
    Validation,
    /// The operation is not allowed in the entity's current lifecycle state.
    InvalidState,
    /// Input text could not be parsed.
    Parse,
    /// A caller-supplied argument is out of range.
    InvalidArgument,
}

/// Errors raised by domain rules.
#[derive(Debug, thiserror::Error)]
pub enum MeterError {
    /// Stay end date precedes its start date.
    #[error("end date {end} must be on or after start date {start}")]
    EndBeforeStart {
        /// Stay start date.
        start: NaiveDate,
        /// Stay end date.
        end: NaiveDate,
    },

    /// Final meter reading does not exceed the initial reading.
    #[error(
        "final reading {final_reading} must be greater than initial reading {initial_reading}"
    )]
    FinalNotAboveInitial {
        /// Reading at stay start.
        initial_reading: f64,
        /// Offending reading at stay end.
        final_reading: f64,
    },

    /// Cabin number is empty or only whitespace.
    #[error("cabin number must not be empty")]
    EmptyCabinNumber,

    /// Attempt to edit a usage that already has its final reading.
    #[error("cannot edit a completed usage: {id}")]
    UsageCompleted {
        /// The locked usage.
        id: UsageId,
    },

    /// Calendar date not in `YYYY-MM-DD` form.
    #[error("invalid date {value:?}: {source}")]
    InvalidDate {
        /// The rejected input.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// Caller-supplied argument out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl MeterError {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EndBeforeStart { .. }
            | Self::FinalNotAboveInitial { .. }
            | Self::EmptyCabinNumber => ErrorKind::Validation,
            Self::UsageCompleted { .. } => ErrorKind::InvalidState,
            Self::InvalidDate { .. } => ErrorKind::Parse,
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
        }
    }

    /// Stable name of the rule that failed, for API error details.
    #[must_use]
    pub fn rule(&self) -> &'static str {
        match self {
            Self::EndBeforeStart { .. } => "end_date_before_start_date",
            Self::FinalNotAboveInitial { .. } => "final_reading_not_above_initial",
            Self::EmptyCabinNumber => "empty_cabin_number",
            Self::UsageCompleted { .. } => "usage_completed",
            Self::InvalidDate { .. } => "invalid_date",
            Self::InvalidArgument(_) => "invalid_argument",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_rules() {
        let err = MeterError::FinalNotAboveInitial {
            initial_reading: 10.0,
            final_reading: 5.0,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.rule(), "final_reading_not_above_initial");

        let err = MeterError::UsageCompleted { id: UsageId::new(3) };
        assert_eq!(err.kind(), ErrorKind::InvalidState);
        assert_eq!(err.to_string(), "cannot edit a completed usage: 3");

        let err = MeterError::InvalidArgument("limit".into());
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }
}
