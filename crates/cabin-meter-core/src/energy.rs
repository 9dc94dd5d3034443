//! Energy and stay-length arithmetic.

use chrono::NaiveDate;

use crate::error::{MeterError, Result};

/// Calendar date format used on the wire and in storage.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Energy consumed between two meter readings.
///
/// Callers ensure `final_reading > initial_reading` beforehand.
#[must_use]
pub fn compute_kwh_used(initial_reading: f64, final_reading: f64) -> f64 {
    final_reading - initial_reading
}

/// Number of days in a stay, counting both endpoints.
#[must_use]
pub fn stay_days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Parse two `YYYY-MM-DD` dates and return the inclusive stay length.
///
/// # Errors
///
/// Returns `MeterError::InvalidDate` if either input is malformed.
pub fn compute_stay_days(start: &str, end: &str) -> Result<i64> {
    Ok(stay_days_between(parse_date(start)?, parse_date(end)?))
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| MeterError::InvalidDate {
        value: value.to_string(),
        source,
    })
}
