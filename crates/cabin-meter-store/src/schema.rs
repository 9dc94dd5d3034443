//! Database schema definitions.
//!
//! Tables are created by the embedded migrations under `migrations/`.

use sqlx::migrate::Migrator;

/// Embedded schema migrations, applied when a store is opened.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Column list selected for every usage read, in `UsageRow` order.
pub const USAGE_COLUMNS: &str = "id, cabin_number, user_name, initial_reading, final_reading, \
     kwh_used, cost_per_kwh, date, start_date, end_date, is_completed";

/// Ordering applied to every usage listing: newest record date first,
/// newest insert first among equal dates.
pub const USAGE_ORDER: &str = "ORDER BY date DESC, id DESC";
