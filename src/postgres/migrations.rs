//! Embedded `PostgreSQL` migrations.
//!
//! ```rust,ignore
//! use carelock::postgres::migrations;
//!
//! migrations::run(&pool).await?;
//! ```

use sqlx::PgPool;

/// Creates the `login_attempts` and `password_history` tables.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations/postgres").run(pool).await
}
