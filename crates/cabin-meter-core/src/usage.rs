//! Usage records: one guest stay in one cabin.
//!
//! This module holds the record itself plus the three mutation shapes the
//! backend accepts (create, complete, partial edit) and the rules they obey.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::energy::{compute_kwh_used, stay_days_between};
use crate::error::{MeterError, Result};
use crate::ids::{CabinNumber, UsageId};

/// A persisted usage record.
///
/// `kwh_used` is present exactly when `is_completed` is true, and then equals
/// `final_reading - initial_reading`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    /// Store-assigned identifier.
    pub id: UsageId,
    /// Owning cabin.
    pub cabin_number: CabinNumber,
    /// Guest name.
    pub user_name: String,
    /// Meter reading at stay start.
    pub initial_reading: f64,
    /// Meter reading at stay end, absent while the stay is ongoing.
    pub final_reading: Option<f64>,
    /// Derived consumption, absent while the stay is ongoing.
    pub kwh_used: Option<f64>,
    /// Tariff for the stay.
    pub cost_per_kwh: f64,
    /// Record/billing date.
    pub date: NaiveDate,
    /// First day of the stay.
    pub start_date: NaiveDate,
    /// Last day of the stay.
    pub end_date: NaiveDate,
    /// Whether the final reading has been recorded.
    pub is_completed: bool,
}

impl Usage {
    /// Record the final meter reading.
    ///
    /// Recomputes `kwh_used`, marks the usage completed and optionally moves the
    /// record date. Completing an already-completed usage is allowed and replaces
    /// the previous final reading. On error the record is left untouched.
    ///
    /// # Errors
    ///
    /// Returns `MeterError::FinalNotAboveInitial` if the reading does not exceed
    /// the initial one.
    pub fn complete(&mut self, completion: &CompleteUsage) -> Result<()> {
        validate_readings(self.initial_reading, completion.final_reading)?;

        self.final_reading = Some(completion.final_reading);
        self.kwh_used = Some(compute_kwh_used(
            self.initial_reading,
            completion.final_reading,
        ));
        self.is_completed = true;
        if let Some(date) = completion.date {
            self.date = date;
        }
        Ok(())
    }

    /// Apply a partial edit.
    ///
    /// Only supplied fields change. The merged stay dates must still satisfy
    /// `end_date >= start_date`. On error the record is left untouched.
    ///
    /// # Errors
    ///
    /// - `MeterError::UsageCompleted` if the usage is already completed.
    /// - `MeterError::EndBeforeStart` if the merged dates are out of order.
    pub fn apply_edit(&mut self, edit: &UsageEdit) -> Result<()> {
        if self.is_completed {
            return Err(MeterError::UsageCompleted { id: self.id });
        }

        let start_date = edit.start_date.unwrap_or(self.start_date);
        let end_date = edit.end_date.unwrap_or(self.end_date);
        validate_date_order(start_date, end_date)?;

        if let Some(user_name) = &edit.user_name {
            self.user_name.clone_from(user_name);
        }
        if let Some(initial_reading) = edit.initial_reading {
            self.initial_reading = initial_reading;
        }
        if let Some(cost_per_kwh) = edit.cost_per_kwh {
            self.cost_per_kwh = cost_per_kwh;
        }
        if let Some(date) = edit.date {
            self.date = date;
        }
        self.start_date = start_date;
        self.end_date = end_date;
        Ok(())
    }

    /// Energy cost of the stay, absent while open.
    #[must_use]
    pub fn cost(&self) -> Option<f64> {
        self.kwh_used.map(|kwh| kwh * self.cost_per_kwh)
    }

    /// Inclusive number of days in the stay.
    #[must_use]
    pub fn stay_days(&self) -> i64 {
        stay_days_between(self.start_date, self.end_date)
    }
}

/// Input for creating a usage record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUsage {
    /// Owning cabin; must exist.
    pub cabin_number: CabinNumber,
    /// Guest name.
    pub user_name: String,
    /// Meter reading at stay start.
    pub initial_reading: f64,
    /// Meter reading at stay end, if the stay is already over.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_reading: Option<f64>,
    /// Tariff for the stay.
    pub cost_per_kwh: f64,
    /// Record/billing date.
    pub date: NaiveDate,
    /// First day of the stay.
    pub start_date: NaiveDate,
    /// Last day of the stay.
    pub end_date: NaiveDate,
}

impl NewUsage {
    /// Check field rules: date order first, then reading order.
    ///
    /// Cabin existence is the store's concern and is checked before this.
    ///
    /// # Errors
    ///
    /// - `MeterError::EndBeforeStart` if `end_date < start_date`.
    /// - `MeterError::FinalNotAboveInitial` if a final reading is supplied and
    ///   does not exceed the initial one.
    pub fn validate(&self) -> Result<()> {
        validate_date_order(self.start_date, self.end_date)?;
        if let Some(final_reading) = self.final_reading {
            validate_readings(self.initial_reading, final_reading)?;
        }
        Ok(())
    }

    /// Whether the record starts out completed.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.final_reading.is_some()
    }

    /// Derived consumption for the new record.
    #[must_use]
    pub fn kwh_used(&self) -> Option<f64> {
        self.final_reading
            .map(|final_reading| compute_kwh_used(self.initial_reading, final_reading))
    }

    /// Validate and turn into a record with the given identifier.
    ///
    /// # Errors
    ///
    /// See [`NewUsage::validate`].
    pub fn into_usage(self, id: UsageId) -> Result<Usage> {
        self.validate()?;
        let kwh_used = self.kwh_used();
        Ok(Usage {
            id,
            is_completed: self.is_completed(),
            kwh_used,
            cabin_number: self.cabin_number,
            user_name: self.user_name,
            initial_reading: self.initial_reading,
            final_reading: self.final_reading,
            cost_per_kwh: self.cost_per_kwh,
            date: self.date,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Input for recording a final meter reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteUsage {
    /// Meter reading at stay end.
    pub final_reading: f64,
    /// Replacement record date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Partial edit of an open usage. Absent fields stay unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageEdit {
    /// New guest name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// New initial reading.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_reading: Option<f64>,
    /// New tariff.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_per_kwh: Option<f64>,
    /// New record date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    /// New stay start.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    /// New stay end.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

/// Filter for listing usages. Results are always newest date first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageQuery {
    /// Restrict to one cabin.
    pub cabin_number: Option<CabinNumber>,
    /// Maximum number of records.
    pub limit: Option<u32>,
}

impl UsageQuery {
    /// All usages.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Usages of one cabin.
    #[must_use]
    pub fn for_cabin(cabin_number: CabinNumber) -> Self {
        Self {
            cabin_number: Some(cabin_number),
            limit: None,
        }
    }

    /// The `limit` most recent usages.
    ///
    /// # Errors
    ///
    /// Returns `MeterError::InvalidArgument` if `limit` is negative or does not
    /// fit in a `u32`.
    pub fn latest(limit: i64) -> Result<Self> {
        let limit = u32::try_from(limit).map_err(|_| {
            MeterError::InvalidArgument(format!(
                "limit must be between 0 and {}, got {limit}",
                u32::MAX
            ))
        })?;
        Ok(Self {
            cabin_number: None,
            limit: Some(limit),
        })
    }
}

/// Reject a stay whose end precedes its start.
///
/// # Errors
///
/// Returns `MeterError::EndBeforeStart` if `end < start`.
pub fn validate_date_order(start: NaiveDate, end: NaiveDate) -> Result<()> {
    if end < start {
        return Err(MeterError::EndBeforeStart { start, end });
    }
    Ok(())
}

/// Reject a final reading that does not exceed the initial one.
///
/// # Errors
///
/// Returns `MeterError::FinalNotAboveInitial` if `final_reading <= initial_reading`.
#[allow(clippy::neg_cmp_op_on_partial_ord)]
pub fn validate_readings(initial_reading: f64, final_reading: f64) -> Result<()> {
    // Negated so NaN readings are rejected too.
    if !(final_reading > initial_reading) {
        return Err(MeterError::FinalNotAboveInitial {
            initial_reading,
            final_reading,
        });
    }
    Ok(())
}
