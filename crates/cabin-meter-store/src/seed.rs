//! Sample data for a fresh database.

use chrono::NaiveDate;

use cabin_meter_core::{CabinNumber, MeterError, NewUsage};

use crate::error::Result;
use crate::sqlite::{insert_cabin, insert_usage, SqliteStore};

/// Cabins created on an empty database.
const SAMPLE_CABINS: [&str; 3] = ["1", "2", "3"];

/// Insert sample cabins and usages if the store has no cabins yet.
///
/// Runs in a single transaction and returns whether anything was inserted, so
/// calling it on every startup is safe.
///
/// # Errors
///
/// Returns an error if the database operation fails.
pub async fn seed_sample_data(store: &SqliteStore) -> Result<bool> {
    let mut tx = store.begin_write().await?;

    let cabins: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cabins")
        .fetch_one(&mut *tx)
        .await?;
    if cabins > 0 {
        tracing::debug!(cabins, "Store already populated, skipping sample data");
        return Ok(false);
    }

    for number in SAMPLE_CABINS {
        insert_cabin(&mut tx, &CabinNumber::new(number)?).await?;
    }

    let usages = sample_usages()?;
    for usage in &usages {
        usage.validate()?;
        insert_usage(&mut tx, usage).await?;
    }

    tx.commit().await?;

    tracing::info!(
        cabins = SAMPLE_CABINS.len(),
        usages = usages.len(),
        "Sample data inserted"
    );
    Ok(true)
}

/// One finished stay and one ongoing stay, both in the first cabin.
fn sample_usages() -> Result<Vec<NewUsage>> {
    let cabin_number = CabinNumber::new(SAMPLE_CABINS[0])?;

    Ok(vec![
        NewUsage {
            cabin_number: cabin_number.clone(),
            user_name: "Jan Kowalski".into(),
            initial_reading: 1000.0,
            final_reading: Some(1050.0),
            cost_per_kwh: 0.75,
            date: date("2025-03-01")?,
            start_date: date("2025-02-25")?,
            end_date: date("2025-03-01")?,
        },
        NewUsage {
            cabin_number,
            user_name: "Anna Nowak".into(),
            initial_reading: 1050.0,
            final_reading: None,
            cost_per_kwh: 0.75,
            date: date("2025-03-10")?,
            start_date: date("2025-03-10")?,
            end_date: date("2025-03-15")?,
        },
    ])
}

fn date(value: &str) -> std::result::Result<NaiveDate, MeterError> {
    value.parse().map_err(|source| MeterError::InvalidDate {
        value: value.to_string(),
        source,
    })
}
