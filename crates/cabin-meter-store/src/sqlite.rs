//! SQLite storage implementation.
//!
//! This module provides the `SqliteStore` implementation of the `Store` trait.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{Sqlite, SqliteConnection, SqliteExecutor, SqlitePool, Transaction};

use cabin_meter_core::{
    Cabin, CabinNumber, CompleteUsage, NewUsage, Usage, UsageEdit, UsageId, UsageQuery,
};

use crate::error::{Result, StoreError};
use crate::rows::{CabinRow, UsageRow};
use crate::schema::{MIGRATOR, USAGE_COLUMNS, USAGE_ORDER};
use crate::Store;

/// Default size of the connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// How long a writer waits for a competing writer's lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-backed storage implementation.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open or create a database file at the given path and apply migrations.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, created or migrated.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with(path, DEFAULT_MAX_CONNECTIONS).await
    }

    /// Like [`SqliteStore::open`], with an explicit pool size.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened, created or migrated.
    pub async fn open_with<P: AsRef<Path>>(path: P, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(BUSY_TIMEOUT);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        MIGRATOR.run(&pool).await?;

        tracing::debug!(path = %path.as_ref().display(), max_connections, "SQLite store opened");

        Ok(Self { pool })
    }

    /// The underlying connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Start a transaction that holds the database write lock from its first
    /// statement.
    ///
    /// A deferred transaction that reads before writing cannot wait for a
    /// competing writer; it fails with `SQLITE_BUSY` instead.
    pub(crate) async fn begin_write(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin_with("BEGIN IMMEDIATE").await?)
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

// =============================================================================
// Statement helpers (shared with the seeding routine)
// =============================================================================

pub(crate) async fn insert_cabin(conn: &mut SqliteConnection, number: &CabinNumber) -> Result<()> {
    let result = sqlx::query("INSERT INTO cabins (number) VALUES (?)")
        .bind(number.as_str())
        .execute(conn)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => Err(StoreError::Conflict {
            entity: "cabin",
            id: number.to_string(),
        }),
        Err(e) => Err(e.into()),
    }
}

pub(crate) async fn cabin_exists(conn: &mut SqliteConnection, number: &CabinNumber) -> Result<bool> {
    let found: Option<String> = sqlx::query_scalar("SELECT number FROM cabins WHERE number = ?")
        .bind(number.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(found.is_some())
}

pub(crate) async fn insert_usage(conn: &mut SqliteConnection, usage: &NewUsage) -> Result<UsageId> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO usages (cabin_number, user_name, initial_reading, final_reading, kwh_used, \
         cost_per_kwh, date, start_date, end_date, is_completed) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(usage.cabin_number.as_str())
    .bind(usage.user_name.as_str())
    .bind(usage.initial_reading)
    .bind(usage.final_reading)
    .bind(usage.kwh_used())
    .bind(usage.cost_per_kwh)
    .bind(usage.date)
    .bind(usage.start_date)
    .bind(usage.end_date)
    .bind(usage.is_completed())
    .fetch_one(conn)
    .await?;

    Ok(UsageId::new(id))
}

async fn fetch_usage<'e, E>(executor: E, id: UsageId) -> Result<Option<Usage>>
where
    E: SqliteExecutor<'e>,
{
    let sql = format!("SELECT {USAGE_COLUMNS} FROM usages WHERE id = ?");
    sqlx::query_as::<_, UsageRow>(&sql)
        .bind(id.get())
        .fetch_optional(executor)
        .await?
        .map(Usage::try_from)
        .transpose()
}

async fn write_usage(conn: &mut SqliteConnection, usage: &Usage) -> Result<()> {
    sqlx::query(
        "UPDATE usages SET user_name = ?, initial_reading = ?, final_reading = ?, kwh_used = ?, \
         cost_per_kwh = ?, date = ?, start_date = ?, end_date = ?, is_completed = ? \
         WHERE id = ?",
    )
    .bind(usage.user_name.as_str())
    .bind(usage.initial_reading)
    .bind(usage.final_reading)
    .bind(usage.kwh_used)
    .bind(usage.cost_per_kwh)
    .bind(usage.date)
    .bind(usage.start_date)
    .bind(usage.end_date)
    .bind(usage.is_completed)
    .bind(usage.id.get())
    .execute(conn)
    .await?;

    Ok(())
}

#[async_trait]
impl Store for SqliteStore {
    // =========================================================================
    // Cabin Operations
    // =========================================================================

    async fn list_cabins(&self) -> Result<Vec<Cabin>> {
        sqlx::query_as::<_, CabinRow>("SELECT number FROM cabins ORDER BY number ASC")
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Cabin::try_from)
            .collect()
    }

    async fn get_cabin(&self, number: &CabinNumber) -> Result<Option<Cabin>> {
        sqlx::query_as::<_, CabinRow>("SELECT number FROM cabins WHERE number = ?")
            .bind(number.as_str())
            .fetch_optional(&self.pool)
            .await?
            .map(Cabin::try_from)
            .transpose()
    }

    async fn create_cabin(&self, number: &CabinNumber) -> Result<Cabin> {
        let mut tx = self.begin_write().await?;
        insert_cabin(&mut tx, number).await?;
        tx.commit().await?;

        Ok(Cabin::new(number.clone()))
    }

    async fn delete_cabin(&self, number: &CabinNumber) -> Result<u64> {
        let mut tx = self.begin_write().await?;

        // Usages go first, in the same transaction, so the cascade does not
        // depend on the connection's foreign key setting.
        let removed = sqlx::query("DELETE FROM usages WHERE cabin_number = ?")
            .bind(number.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM cabins WHERE number = ?")
            .bind(number.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::cabin_not_found(number));
        }

        tx.commit().await?;
        Ok(removed)
    }

    // =========================================================================
    // Usage Operations
    // =========================================================================

    async fn list_usages(&self, query: &UsageQuery) -> Result<Vec<Usage>> {
        let mut builder =
            sqlx::QueryBuilder::<sqlx::Sqlite>::new(format!("SELECT {USAGE_COLUMNS} FROM usages"));

        if let Some(number) = &query.cabin_number {
            builder.push(" WHERE cabin_number = ");
            builder.push_bind(number.to_string());
        }

        builder.push(" ");
        builder.push(USAGE_ORDER);

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::from(limit));
        }

        builder
            .build_query_as::<UsageRow>()
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Usage::try_from)
            .collect()
    }

    async fn get_usage(&self, id: UsageId) -> Result<Option<Usage>> {
        fetch_usage(&self.pool, id).await
    }

    async fn last_meter_reading(&self, number: &CabinNumber) -> Result<f64> {
        let mut tx = self.pool.begin().await?;

        let completed: Option<f64> = sqlx::query_scalar(&format!(
            "SELECT final_reading FROM usages \
             WHERE cabin_number = ? AND is_completed = 1 AND final_reading IS NOT NULL \
             {USAGE_ORDER} LIMIT 1"
        ))
        .bind(number.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        let reading = match completed {
            Some(reading) => reading,
            None => {
                let latest: Option<f64> = sqlx::query_scalar(&format!(
                    "SELECT initial_reading FROM usages WHERE cabin_number = ? \
                     {USAGE_ORDER} LIMIT 1"
                ))
                .bind(number.as_str())
                .fetch_optional(&mut *tx)
                .await?;
                latest.unwrap_or(0.0)
            }
        };

        tx.commit().await?;
        Ok(reading)
    }

    async fn create_usage(&self, usage: NewUsage) -> Result<Usage> {
        let mut tx = self.begin_write().await?;

        if !cabin_exists(&mut tx, &usage.cabin_number).await? {
            return Err(StoreError::cabin_not_found(&usage.cabin_number));
        }
        usage.validate()?;

        let id = insert_usage(&mut tx, &usage).await?;
        let usage = usage.into_usage(id)?;
        tx.commit().await?;

        Ok(usage)
    }

    async fn complete_usage(&self, id: UsageId, completion: &CompleteUsage) -> Result<Usage> {
        let mut tx = self.begin_write().await?;

        let mut usage = fetch_usage(&mut *tx, id)
            .await?
            .ok_or_else(|| StoreError::usage_not_found(id))?;
        usage.complete(completion)?;

        write_usage(&mut tx, &usage).await?;
        tx.commit().await?;
        Ok(usage)
    }

    async fn edit_usage(&self, id: UsageId, edit: &UsageEdit) -> Result<Usage> {
        let mut tx = self.begin_write().await?;

        let mut usage = fetch_usage(&mut *tx, id)
            .await?
            .ok_or_else(|| StoreError::usage_not_found(id))?;
        usage.apply_edit(edit)?;

        write_usage(&mut tx, &usage).await?;
        tx.commit().await?;
        Ok(usage)
    }

    async fn delete_usage(&self, id: UsageId) -> Result<()> {
        let deleted = sqlx::query("DELETE FROM usages WHERE id = ?")
            .bind(id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if deleted == 0 {
            return Err(StoreError::usage_not_found(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabin_meter_core::MeterError;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    async fn create_test_store() -> (SqliteStore, TempDir) {
        let dir = TempDir::new().unwrap();
        let store = SqliteStore::open(dir.path().join("test.db")).await.unwrap();
        (store, dir)
    }

    fn cabin(number: &str) -> CabinNumber {
        CabinNumber::new(number).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn new_usage(number: &str, initial: f64, final_reading: Option<f64>, day: &str) -> NewUsage {
        NewUsage {
            cabin_number: cabin(number),
            user_name: "Jan Kowalski".into(),
            initial_reading: initial,
            final_reading,
            cost_per_kwh: 0.75,
            date: date(day),
            start_date: date("2025-02-25"),
            end_date: date("2025-03-01"),
        }
    }

    async fn usage_count(store: &SqliteStore) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM usages")
            .fetch_one(store.pool())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn cabin_crud() {
        let (store, _dir) = create_test_store().await;

        store.create_cabin(&cabin("2")).await.unwrap();
        store.create_cabin(&cabin("10")).await.unwrap();
        store.create_cabin(&cabin("1")).await.unwrap();

        let numbers: Vec<String> = store
            .list_cabins()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.number.to_string())
            .collect();
        assert_eq!(numbers, ["1", "10", "2"]);

        assert!(store.get_cabin(&cabin("10")).await.unwrap().is_some());
        assert!(store.get_cabin(&cabin("3")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_cabin_conflicts() {
        let (store, _dir) = create_test_store().await;

        store.create_cabin(&cabin("1")).await.unwrap();
        let err = store.create_cabin(&cabin("1")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict { entity: "cabin", .. }));
        assert_eq!(store.list_cabins().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn concurrent_duplicate_cabin_creates_one_row() {
        let (store, _dir) = create_test_store().await;
        let number = cabin("7");

        let (a, b) = tokio::join!(store.create_cabin(&number), store.create_cabin(&number));

        let successes = [a.is_ok(), b.is_ok()].iter().filter(|ok| **ok).count();
        assert_eq!(successes, 1);
        let failure = if a.is_err() { a } else { b };
        assert!(matches!(failure, Err(StoreError::Conflict { .. })));
        assert_eq!(store.list_cabins().await.unwrap().len(), 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_writers_all_succeed() {
        const WRITERS: usize = 40;

        let (store, _dir) = create_test_store().await;
        store.create_cabin(&cabin("1")).await.unwrap();

        let mut ids = Vec::with_capacity(WRITERS);
        for _ in 0..WRITERS {
            let usage = store
                .create_usage(new_usage("1", 100.0, None, "2025-03-01"))
                .await
                .unwrap();
            ids.push(usage.id);
        }

        let completions: Vec<_> = ids
            .into_iter()
            .map(|id| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .complete_usage(
                            id,
                            &CompleteUsage {
                                final_reading: 150.0,
                                date: None,
                            },
                        )
                        .await
                })
            })
            .collect();
        for handle in completions {
            let usage = handle.await.unwrap().unwrap();
            assert_eq!(usage.kwh_used, Some(50.0));
        }

        let creates: Vec<_> = (0..WRITERS)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create_usage(new_usage("1", 200.0, None, "2025-03-02"))
                        .await
                })
            })
            .collect();
        for handle in creates {
            handle.await.unwrap().unwrap();
        }

        let count = usize::try_from(usage_count(&store).await).unwrap();
        assert_eq!(count, 2 * WRITERS);
        let completed: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM usages WHERE is_completed = 1")
                .fetch_one(store.pool())
                .await
                .unwrap();
        assert_eq!(usize::try_from(completed).unwrap(), WRITERS);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn create_usage_racing_cabin_delete() {
        let (store, _dir) = create_test_store().await;

        for round in 0..20 {
            let number = cabin(&round.to_string());
            store.create_cabin(&number).await.unwrap();

            let creator = {
                let store = store.clone();
                let number = number.to_string();
                tokio::spawn(async move {
                    store
                        .create_usage(new_usage(&number, 10.0, None, "2025-03-01"))
                        .await
                })
            };
            let deleter = {
                let store = store.clone();
                let number = number.clone();
                tokio::spawn(async move { store.delete_cabin(&number).await })
            };

            deleter.await.unwrap().unwrap();
            match creator.await.unwrap() {
                Ok(_) | Err(StoreError::NotFound { entity: "cabin", .. }) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(usage_count(&store).await, 0);
    }

    #[tokio::test]
    async fn delete_cabin_cascades() {
        let (store, _dir) = create_test_store().await;
        store.create_cabin(&cabin("1")).await.unwrap();
        store.create_cabin(&cabin("2")).await.unwrap();

        let a = store
            .create_usage(new_usage("1", 1000.0, Some(1050.0), "2025-03-01"))
            .await
            .unwrap();
        let b = store
            .create_usage(new_usage("1", 1050.0, None, "2025-03-10"))
            .await
            .unwrap();
        let other = store
            .create_usage(new_usage("2", 10.0, None, "2025-03-10"))
            .await
            .unwrap();

        let removed = store.delete_cabin(&cabin("1")).await.unwrap();
        assert_eq!(removed, 2);

        assert!(store.get_cabin(&cabin("1")).await.unwrap().is_none());
        assert!(store.get_usage(a.id).await.unwrap().is_none());
        assert!(store.get_usage(b.id).await.unwrap().is_none());
        assert!(store.get_usage(other.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn delete_missing_cabin_not_found() {
        let (store, _dir) = create_test_store().await;
        let err = store.delete_cabin(&cabin("9")).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "cabin", .. }));
    }

    #[tokio::test]
    async fn create_usage_assigns_increasing_ids() {
        let (store, _dir) = create_test_store().await;
        store.create_cabin(&cabin("1")).await.unwrap();

        let first = store
            .create_usage(new_usage("1", 1000.0, Some(1050.0), "2025-03-01"))
            .await
            .unwrap();
        assert!(first.is_completed);
        assert_eq!(first.kwh_used, Some(50.0));

        let second = store
            .create_usage(new_usage("1", 1050.0, None, "2025-03-10"))
            .await
            .unwrap();
        assert!(second.id > first.id);
        assert!(!second.is_completed);

        let stored = store.get_usage(first.id).await.unwrap().unwrap();
        assert_eq!(stored, first);
    }

    #[tokio::test]
    async fn create_usage_for_missing_cabin_persists_nothing() {
        let (store, _dir) = create_test_store().await;

        // Also invalid dates: the missing cabin is reported first.
        let mut input = new_usage("404", 1.0, Some(0.5), "2025-03-01");
        input.end_date = date("2025-01-01");

        let err = store.create_usage(input).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { entity: "cabin", .. }));
        assert_eq!(usage_count(&store).await, 0);
    }

    #[tokio::test]
    async fn create_usage_validation_persists_nothing() {
        let (store, _dir) = create_test_store().await;
        store.create_cabin(&cabin("1")).await.unwrap();

        let mut input = new_usage("1", 1000.0, None, "2025-03-01");
        input.end_date = date("2025-02-01");
        let err = store.create_usage(input).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(MeterError::EndBeforeStart { .. })
        ));

        let err = store
            .create_usage(new_usage("1", 1000.0, Some(1000.0), "2025-03-01"))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(MeterError::FinalNotAboveInitial { .. })
        ));

        assert_eq!(usage_count(&store).await, 0);
    }

    #[tokio::test]
    async fn list_usages_orders_filters_and_limits() {
        let (store, _dir) = create_test_store().await;
        store.create_cabin(&cabin("1")).await.unwrap();
        store.create_cabin(&cabin("2")).await.unwrap();

        store
            .create_usage(new_usage("1", 1.0, None, "2025-01-05"))
            .await
            .unwrap();
        store
            .create_usage(new_usage("2", 1.0, None, "2025-03-05"))
            .await
            .unwrap();
        store
            .create_usage(new_usage("1", 1.0, None, "2025-02-05"))
            .await
            .unwrap();

        let dates = |usages: Vec<Usage>| -> Vec<String> {
            usages.iter().map(|u| u.date.to_string()).collect()
        };

        let all = store.list_usages(&UsageQuery::all()).await.unwrap();
        assert_eq!(dates(all), ["2025-03-05", "2025-02-05", "2025-01-05"]);

        let latest = store
            .list_usages(&UsageQuery::latest(2).unwrap())
            .await
            .unwrap();
        assert_eq!(dates(latest), ["2025-03-05", "2025-02-05"]);

        let none = store
            .list_usages(&UsageQuery::latest(0).unwrap())
            .await
            .unwrap();
        assert!(none.is_empty());

        let cabin_one = store
            .list_usages(&UsageQuery::for_cabin(cabin("1")))
            .await
            .unwrap();
        assert_eq!(dates(cabin_one), ["2025-02-05", "2025-01-05"]);
    }

    #[tokio::test]
    async fn last_meter_reading_fallbacks() {
        let (store, _dir) = create_test_store().await;
        store.create_cabin(&cabin("1")).await.unwrap();

        // No usages at all.
        assert!(store.last_meter_reading(&cabin("1")).await.unwrap().abs() < f64::EPSILON);

        // Only an open usage: its initial reading.
        let open = store
            .create_usage(new_usage("1", 1200.0, None, "2025-03-10"))
            .await
            .unwrap();
        let reading = store.last_meter_reading(&cabin("1")).await.unwrap();
        assert!((reading - 1200.0).abs() < f64::EPSILON);

        // An older completed usage wins over a newer open one.
        store
            .create_usage(new_usage("1", 1000.0, Some(1050.0), "2025-03-01"))
            .await
            .unwrap();
        let reading = store.last_meter_reading(&cabin("1")).await.unwrap();
        assert!((reading - 1050.0).abs() < f64::EPSILON);

        // Completing the newer one moves the reading forward.
        store
            .complete_usage(
                open.id,
                &CompleteUsage {
                    final_reading: 1300.0,
                    date: None,
                },
            )
            .await
            .unwrap();
        let reading = store.last_meter_reading(&cabin("1")).await.unwrap();
        assert!((reading - 1300.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn complete_and_edit_lifecycle() {
        let (store, _dir) = create_test_store().await;
        store.create_cabin(&cabin("1")).await.unwrap();
        let usage = store
            .create_usage(new_usage("1", 1050.0, None, "2025-03-10"))
            .await
            .unwrap();

        let edited = store
            .edit_usage(
                usage.id,
                &UsageEdit {
                    user_name: Some("Anna Nowak".into()),
                    ..UsageEdit::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(edited.user_name, "Anna Nowak");

        let completed = store
            .complete_usage(
                usage.id,
                &CompleteUsage {
                    final_reading: 1100.0,
                    date: Some(date("2025-03-15")),
                },
            )
            .await
            .unwrap();
        assert!(completed.is_completed);
        assert_eq!(completed.kwh_used, Some(50.0));
        assert_eq!(completed.date, date("2025-03-15"));

        let err = store
            .edit_usage(
                usage.id,
                &UsageEdit {
                    user_name: Some("X".into()),
                    ..UsageEdit::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(MeterError::UsageCompleted { .. })
        ));

        let stored = store.get_usage(usage.id).await.unwrap().unwrap();
        assert_eq!(stored, completed);
    }

    #[tokio::test]
    async fn failed_completion_leaves_record() {
        let (store, _dir) = create_test_store().await;
        store.create_cabin(&cabin("1")).await.unwrap();
        let usage = store
            .create_usage(new_usage("1", 1050.0, None, "2025-03-10"))
            .await
            .unwrap();

        let err = store
            .complete_usage(
                usage.id,
                &CompleteUsage {
                    final_reading: 1050.0,
                    date: Some(date("2025-04-01")),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(MeterError::FinalNotAboveInitial { .. })
        ));
        assert_eq!(store.get_usage(usage.id).await.unwrap().unwrap(), usage);
    }

    #[tokio::test]
    async fn missing_usage_operations_not_found() {
        let (store, _dir) = create_test_store().await;
        let id = UsageId::new(99);

        assert!(store.get_usage(id).await.unwrap().is_none());
        assert!(matches!(
            store.delete_usage(id).await,
            Err(StoreError::NotFound { entity: "usage", .. })
        ));
        assert!(matches!(
            store
                .complete_usage(
                    id,
                    &CompleteUsage {
                        final_reading: 1.0,
                        date: None
                    }
                )
                .await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(matches!(
            store.edit_usage(id, &UsageEdit::default()).await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn delete_usage_removes_row() {
        let (store, _dir) = create_test_store().await;
        store.create_cabin(&cabin("1")).await.unwrap();
        let usage = store
            .create_usage(new_usage("1", 1.0, None, "2025-03-10"))
            .await
            .unwrap();

        store.delete_usage(usage.id).await.unwrap();
        assert!(store.get_usage(usage.id).await.unwrap().is_none());
        assert!(store.get_cabin(&cabin("1")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn reopen_keeps_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("persist.db");

        let store = SqliteStore::open(&path).await.unwrap();
        store.create_cabin(&cabin("5a")).await.unwrap();
        store.close().await;

        let store = SqliteStore::open(&path).await.unwrap();
        assert!(store.get_cabin(&cabin("5a")).await.unwrap().is_some());
    }
}
