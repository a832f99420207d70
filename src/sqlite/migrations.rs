//! Embedded `SQLite` migrations, tracked in `_carelock_migrations`.
//!
//! ```rust,ignore
//! use carelock::sqlite::migrations;
//!
//! migrations::run(&pool).await?;
//! ```

use sqlx::{Executor, SqlitePool};

const MIGRATIONS: &[(&str, &str)] = &[
    (
        "20240301000001_create_login_attempts_table",
        include_str!("../../migrations_sqlite/20240301000001_create_login_attempts_table.sql"),
    ),
    (
        "20240301000002_create_password_history_table",
        include_str!("../../migrations_sqlite/20240301000002_create_password_history_table.sql"),
    ),
];

/// Applies every migration not yet recorded, in order.
pub async fn run(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    pool.execute(
        r"
        CREATE TABLE IF NOT EXISTS _carelock_migrations (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        )
        ",
    )
    .await?;

    for (name, sql) in MIGRATIONS {
        let applied: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM _carelock_migrations WHERE name = ?)")
                .bind(*name)
                .fetch_one(pool)
                .await?;

        if applied {
            continue;
        }

        // Statements are split on `;`. Bundled migrations contain no
        // semicolons inside literals.
        for statement in sql.split(';') {
            let trimmed = statement.trim();
            if !trimmed.is_empty() {
                pool.execute(trimmed).await?;
            }
        }

        sqlx::query("INSERT INTO _carelock_migrations (name) VALUES (?)")
            .bind(*name)
            .execute(pool)
            .await?;

        log::info!(target: "carelock", "msg=\"applied migration\", name=\"{name}\"");
    }

    Ok(())
}
