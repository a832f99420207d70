//! `SQLite` repository implementations. Enable the `sqlx_sqlite` feature.
//!
//! Suitable for single-instance deployments and tests (`sqlite::memory:`).

mod login_attempt;
pub mod migrations;
mod password_history;
mod timestamp;

pub use login_attempt::SqliteLoginAttemptRepository;
pub use password_history::SqlitePasswordHistoryRepository;

use std::time::Duration;

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Pool settings for `database_url`.
///
/// An in-memory database lives only as long as one of its connections, so
/// for `:memory:` URLs a single connection is kept open for the life of the
/// pool.
pub fn pool_options(database_url: &str) -> SqlitePoolOptions {
    if database_url.contains(":memory:") {
        SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        SqlitePoolOptions::new().max_connections(5)
    }
}

/// Connects with [`pool_options`] and applies the migrations.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let pool = pool_options(database_url).connect(database_url).await?;
    migrations::run(&pool).await?;
    Ok(pool)
}

/// Creates both repositories from one connection pool.
pub fn create_repositories(
    pool: SqlitePool,
) -> (SqliteLoginAttemptRepository, SqlitePasswordHistoryRepository) {
    (
        SqliteLoginAttemptRepository::new(pool.clone()),
        SqlitePasswordHistoryRepository::new(pool),
    )
}
