//! Database connection management

use std::{fmt::Display, time::Duration};

use sqlx::{
    PgPool, Postgres, Transaction, migrate::MigrateError, postgres::PgPoolOptions, query,
};
use tracing::warn;

/// SQL used to bound how long a unit of work waits on a row lock.
pub const SET_LOCK_TIMEOUT_SQL: &str = "SELECT set_config('lock_timeout', $1, true)";

/// SQLSTATE codes raised when concurrent writers collide: serialization
/// failure, deadlock detected and lock not available.
const WRITE_CONFLICT_CODES: [&str; 3] = ["40001", "40P01", "55P03"];

/// SQLSTATE for a value that doesn't fit its column type.
const OUT_OF_RANGE_CODE: &str = "22003";

/// Connection pool settings.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub max_lifetime: Duration,
    pub lock_timeout: Duration,
}

impl DatabaseSettings {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 100,
            min_connections: 10,
            max_lifetime: Duration::from_secs(60 * 60),
            lock_timeout: Duration::from_secs(5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
    lock_timeout: Duration,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool, lock_timeout: Duration) -> Self {
        Self { pool, lock_timeout }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Begin a unit of work with the configured lock timeout applied.
    ///
    /// # Errors
    ///
    /// Returns an error when starting the transaction or setting the timeout fails.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        let mut tx = self.pool.begin().await?;

        query(SET_LOCK_TIMEOUT_SQL)
            .bind(format!("{}ms", self.lock_timeout.as_millis()))
            .execute(&mut *tx)
            .await?;

        Ok(tx)
    }
}

/// Commit the unit of work when `result` is `Ok`, otherwise roll it back
/// explicitly before handing the original error back to the caller.
///
/// A failed rollback is logged and the original error wins; the server
/// discards the transaction when the connection is returned to the pool.
///
/// # Errors
///
/// Returns the error carried by `result`, or the commit failure.
pub async fn settle<T, E>(tx: Transaction<'static, Postgres>, result: Result<T, E>) -> Result<T, E>
where
    E: From<sqlx::Error> + Display,
{
    match result {
        Ok(value) => {
            tx.commit().await?;

            Ok(value)
        }
        Err(error) => {
            if let Err(rollback) = tx.rollback().await {
                warn!("failed to roll back after \"{error}\": {rollback}");
            }

            Err(error)
        }
    }
}

/// Whether a storage error signals a concurrent-write collision rather than a
/// fault.
#[must_use]
pub fn is_write_conflict(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .is_some_and(|code| WRITE_CONFLICT_CODES.contains(&&*code))
}

/// Whether a storage error was raised by a value too large for its column.
#[must_use]
pub fn is_out_of_range(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .and_then(|db_error| db_error.code())
        .is_some_and(|code| code == OUT_OF_RANGE_CODE)
}

/// Connect to `PostgreSQL`.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(settings: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .min_connections(settings.min_connections)
        .max_lifetime(settings.max_lifetime)
        .connect(&settings.url)
        .await
}

/// Apply pending schema migrations.
///
/// # Errors
///
/// Returns an error if a migration fails to apply.
pub async fn migrate(pool: &PgPool) -> Result<(), MigrateError> {
    sqlx::migrate!("../../migrations").run(pool).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_match_pool_defaults() {
        let settings = DatabaseSettings::new("postgres://localhost/stockroom");

        assert_eq!(settings.max_connections, 100);
        assert_eq!(settings.min_connections, 10);
        assert_eq!(settings.max_lifetime, Duration::from_secs(3600));
        assert_eq!(settings.lock_timeout, Duration::from_secs(5));
    }

    #[test]
    fn non_database_errors_are_not_conflicts() {
        assert!(!is_write_conflict(&sqlx::Error::RowNotFound));
        assert!(!is_write_conflict(&sqlx::Error::PoolTimedOut));
        assert!(!is_out_of_range(&sqlx::Error::RowNotFound));
    }
}
