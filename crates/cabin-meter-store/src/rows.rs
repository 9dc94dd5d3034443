//! Row types mirroring the SQLite tables.
//!
//! Rows are plain column holders; conversion to domain records re-checks the
//! invariants that the domain types encode.

use chrono::NaiveDate;

use cabin_meter_core::{Cabin, CabinNumber, Usage, UsageId};

use crate::error::StoreError;

/// A row of the `cabins` table.
#[derive(Debug, sqlx::FromRow)]
pub struct CabinRow {
    /// Primary key.
    pub number: String,
}

impl TryFrom<CabinRow> for Cabin {
    type Error = StoreError;

    fn try_from(row: CabinRow) -> Result<Self, Self::Error> {
        Ok(Cabin::new(decode_cabin_number(row.number)?))
    }
}

/// A row of the `usages` table.
#[derive(Debug, sqlx::FromRow)]
pub struct UsageRow {
    /// Primary key.
    pub id: i64,
    /// Foreign key to `cabins.number`.
    pub cabin_number: String,
    /// Guest name.
    pub user_name: String,
    /// Reading at stay start.
    pub initial_reading: f64,
    /// Reading at stay end.
    pub final_reading: Option<f64>,
    /// Derived consumption.
    pub kwh_used: Option<f64>,
    /// Tariff.
    pub cost_per_kwh: f64,
    /// Record date.
    pub date: NaiveDate,
    /// Stay start.
    pub start_date: NaiveDate,
    /// Stay end.
    pub end_date: NaiveDate,
    /// Completion flag.
    pub is_completed: bool,
}

impl TryFrom<UsageRow> for Usage {
    type Error = StoreError;

    fn try_from(row: UsageRow) -> Result<Self, Self::Error> {
        if row.is_completed != row.kwh_used.is_some() {
            return Err(StoreError::Serialization(format!(
                "usage {} has is_completed={} but kwh_used={:?}",
                row.id, row.is_completed, row.kwh_used
            )));
        }

        Ok(Usage {
            id: UsageId::new(row.id),
            cabin_number: decode_cabin_number(row.cabin_number)?,
            user_name: row.user_name,
            initial_reading: row.initial_reading,
            final_reading: row.final_reading,
            kwh_used: row.kwh_used,
            cost_per_kwh: row.cost_per_kwh,
            date: row.date,
            start_date: row.start_date,
            end_date: row.end_date,
            is_completed: row.is_completed,
        })
    }
}

fn decode_cabin_number(raw: String) -> Result<CabinNumber, StoreError> {
    CabinNumber::new(&raw)
        .map_err(|e| StoreError::Serialization(format!("stored cabin number {raw:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(is_completed: bool, kwh_used: Option<f64>) -> UsageRow {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        UsageRow {
            id: 9,
            cabin_number: "2".into(),
            user_name: "guest".into(),
            initial_reading: 10.0,
            final_reading: kwh_used.map(|k| 10.0 + k),
            kwh_used,
            cost_per_kwh: 1.0,
            date: day,
            start_date: day,
            end_date: day,
            is_completed,
        }
    }

    #[test]
    fn consistent_row_converts() {
        let usage = Usage::try_from(row(true, Some(4.0))).unwrap();
        assert_eq!(usage.id, UsageId::new(9));
        assert_eq!(usage.cabin_number.as_str(), "2");
        assert_eq!(usage.kwh_used, Some(4.0));
    }

    #[test]
    fn inconsistent_row_is_rejected() {
        let err = Usage::try_from(row(false, Some(4.0))).unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn blank_cabin_number_is_rejected() {
        let err = Cabin::try_from(CabinRow {
            number: " ".into(),
        })
        .unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
