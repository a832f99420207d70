//! `PostgreSQL` repository implementations. Enable the `sqlx_postgres` feature.

mod login_attempt;
pub mod migrations;
mod password_history;

pub use login_attempt::PostgresLoginAttemptRepository;
pub use password_history::PostgresPasswordHistoryRepository;

use sqlx::PgPool;

/// Creates both repositories from one connection pool.
pub fn create_repositories(
    pool: PgPool,
) -> (
    PostgresLoginAttemptRepository,
    PostgresPasswordHistoryRepository,
) {
    (
        PostgresLoginAttemptRepository::new(pool.clone()),
        PostgresPasswordHistoryRepository::new(pool),
    )
}
