//! SQLite storage layer for cabin meter tracking.
//!
//! This crate provides persistent storage for cabins and their usage records
//! using SQLite through `sqlx`.
//!
//! # Architecture
//!
//! Two tables hold the data:
//!
//! - `cabins`: Cabin records, keyed by `number`
//! - `usages`: Usage records, keyed by an auto-incremented `id`, each
//!   referencing its cabin; deleting a cabin deletes its usages
//!
//! Every operation on the [`Store`] trait is one unit of work: it runs inside a
//! single transaction that is committed on success and rolled back on error.
//!
//! # Example
//!
//! ```no_run
//! use cabin_meter_core::CabinNumber;
//! use cabin_meter_store::{SqliteStore, Store};
//!
//! # async fn example() -> cabin_meter_store::Result<()> {
//! let store = SqliteStore::open("/tmp/cabin-meter.db").await?;
//!
//! let number = CabinNumber::new("5a")?;
//! store.create_cabin(&number).await?;
//!
//! let reading = store.last_meter_reading(&number).await?;
//! assert_eq!(reading, 0.0);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod rows;
pub mod schema;
pub mod seed;
pub mod sqlite;

pub use error::{Result, StoreError};
pub use seed::seed_sample_data;
pub use sqlite::SqliteStore;

use async_trait::async_trait;
use cabin_meter_core::{
    Cabin, CabinNumber, CompleteUsage, NewUsage, Usage, UsageEdit, UsageId, UsageQuery,
};

/// The storage trait defining all database operations.
///
/// This trait abstracts the storage layer so handlers do not depend on a
/// particular database.
#[async_trait]
pub trait Store: Send + Sync {
    // =========================================================================
    // Cabin Operations
    // =========================================================================

    /// List all cabins ordered by number (lexicographic).
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_cabins(&self) -> Result<Vec<Cabin>>;

    /// Get a cabin by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_cabin(&self, number: &CabinNumber) -> Result<Option<Cabin>>;

    /// Insert a new cabin.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Conflict` if a cabin with this number exists.
    async fn create_cabin(&self, number: &CabinNumber) -> Result<Cabin>;

    /// Delete a cabin together with all of its usages.
    ///
    /// Returns the number of usages removed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the cabin doesn't exist.
    async fn delete_cabin(&self, number: &CabinNumber) -> Result<u64>;

    // =========================================================================
    // Usage Operations
    // =========================================================================

    /// List usages matching `query`, newest date first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn list_usages(&self, query: &UsageQuery) -> Result<Vec<Usage>>;

    /// Get a usage by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn get_usage(&self, id: UsageId) -> Result<Option<Usage>>;

    /// Latest known meter reading of a cabin.
    ///
    /// The final reading of the newest completed usage if there is one, else
    /// the initial reading of the newest usage, else `0.0`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn last_meter_reading(&self, number: &CabinNumber) -> Result<f64>;

    /// Insert a new usage and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the referenced cabin doesn't exist.
    /// - `StoreError::Domain` if the input breaks a validation rule.
    async fn create_usage(&self, usage: NewUsage) -> Result<Usage>;

    /// Record the final reading of a usage.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the usage doesn't exist.
    /// - `StoreError::Domain` if the final reading does not exceed the initial one.
    async fn complete_usage(&self, id: UsageId, completion: &CompleteUsage) -> Result<Usage>;

    /// Apply a partial edit to an open usage.
    ///
    /// # Errors
    ///
    /// - `StoreError::NotFound` if the usage doesn't exist.
    /// - `StoreError::Domain` if the usage is completed or the merged dates are
    ///   out of order.
    async fn edit_usage(&self, id: UsageId, edit: &UsageEdit) -> Result<Usage>;

    /// Delete a usage.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the usage doesn't exist.
    async fn delete_usage(&self, id: UsageId) -> Result<()>;
}
