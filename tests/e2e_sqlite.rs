// these tests use #[serial] to run sequentially because each one opens its
// own in-memory database on a single-connection pool.
#![allow(clippy::indexing_slicing)]

//! End-to-end tests for `SQLite` repositories.
//!
//! These tests use an in-memory `SQLite` database.
//! Run with: `cargo test --features sqlx_sqlite --test e2e_sqlite`

#![cfg(feature = "sqlx_sqlite")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use carelock::actions::{
    CheckRateLimitAction, PasswordReuseDecision, RateLimitDecision, ValidatePasswordAction,
};
use carelock::sqlite::{migrations, SqliteLoginAttemptRepository, SqlitePasswordHistoryRepository};
use carelock::{
    AuthError, LoginAttemptRepository, PasswordHistoryConfig, PasswordHistoryRepository,
    SecretString, ValidationError,
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serial_test::serial;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

async fn setup_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory SQLite database");

    migrations::run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

fn minute(m: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(m)
}

#[test]
fn test_in_memory_pool_keeps_its_connection() {
    let options = carelock::sqlite::pool_options("sqlite::memory:");
    assert_eq!(options.get_min_connections(), 1);
    assert_eq!(options.get_max_connections(), 1);
    assert!(options.get_idle_timeout().is_none());
    assert!(options.get_max_lifetime().is_none());

    let file = carelock::sqlite::pool_options("sqlite://carelock.db?mode=rwc");
    assert_eq!(file.get_max_connections(), 5);
    assert!(file.get_idle_timeout().is_some());
}

#[tokio::test]
#[serial]
async fn test_connect_runs_migrations() {
    let pool = carelock::sqlite::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory SQLite database");
    let repo = SqliteLoginAttemptRepository::new(pool);

    repo.record_attempt("a@b.com", false, minute(0)).await.unwrap();
    let attempts = repo.find_attempts_since("a@b.com", minute(0)).await.unwrap();
    assert_eq!(attempts.len(), 1);
}

#[tokio::test]
#[serial]
async fn test_long_identifiers_are_stored() {
    let pool = setup_db().await;
    let repo = SqliteLoginAttemptRepository::new(pool.clone());
    let history = SqlitePasswordHistoryRepository::new(pool);
    let identifier = format!("{}@ward7.example.org", "n".repeat(400));
    let user_id = "u".repeat(400);

    let decision = CheckRateLimitAction::new(repo.clone())
        .execute_at(&identifier, false, minute(0))
        .await
        .unwrap();
    assert_eq!(decision.remaining_attempts(), Some(4));

    history
        .append(&user_id, &SecretString::new("hash-a"), minute(0))
        .await
        .unwrap();
    assert_eq!(history.find_recent(&user_id, 5).await.unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn test_migrations_are_idempotent() {
    let pool = setup_db().await;

    migrations::run(&pool)
        .await
        .expect("Second migration run should be a no-op");

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _carelock_migrations")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(applied, 2);
}

#[tokio::test]
#[serial]
async fn test_login_attempt_repository() {
    let pool = setup_db().await;
    let repo = SqliteLoginAttemptRepository::new(pool);

    let recorded = repo
        .record_attempt("a@b.com", false, minute(0))
        .await
        .expect("Failed to record attempt");
    assert_eq!(recorded.identifier, "a@b.com");
    assert!(!recorded.success);
    assert_eq!(recorded.attempted_at, minute(0));

    repo.record_attempt("a@b.com", true, minute(5)).await.unwrap();
    repo.record_attempt("a@b.com", false, minute(10)).await.unwrap();
    repo.record_attempt("other@b.com", false, minute(10))
        .await
        .unwrap();

    let attempts = repo.find_attempts_since("a@b.com", minute(0)).await.unwrap();
    assert_eq!(attempts.len(), 3);
    // newest first
    assert_eq!(attempts[0].attempted_at, minute(10));
    assert!(attempts[1].success);
    assert_eq!(attempts[2].attempted_at, minute(0));

    // the lower bound is inclusive
    let attempts = repo.find_attempts_since("a@b.com", minute(5)).await.unwrap();
    assert_eq!(attempts.len(), 2);

    let attempts = repo
        .find_attempts_since("a@b.com", minute(10) + Duration::seconds(1))
        .await
        .unwrap();
    assert!(attempts.is_empty());
}

#[tokio::test]
#[serial]
async fn test_timestamps_keep_sub_second_precision() {
    let pool = setup_db().await;
    let repo = SqliteLoginAttemptRepository::new(pool);

    let at = minute(0) + Duration::microseconds(1_250);
    repo.record_attempt("a@b.com", false, at).await.unwrap();

    let attempts = repo.find_attempts_since("a@b.com", at).await.unwrap();
    assert_eq!(attempts.len(), 1);
    assert_eq!(attempts[0].attempted_at, at);

    let attempts = repo
        .find_attempts_since("a@b.com", at + Duration::microseconds(1))
        .await
        .unwrap();
    assert!(attempts.is_empty());
}

#[tokio::test]
#[serial]
async fn test_password_history_repository() {
    let pool = setup_db().await;
    let repo = SqlitePasswordHistoryRepository::new(pool);

    for (i, m) in [0, 1, 2].into_iter().enumerate() {
        repo.append("user-1", &SecretString::new(format!("hash-{i}")), minute(m))
            .await
            .expect("Failed to append password hash");
    }
    repo.append("user-2", &SecretString::new("hash-x"), minute(3))
        .await
        .unwrap();

    let recent = repo.find_recent("user-1", 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].password_hash, SecretString::new("hash-2"));
    assert_eq!(recent[1].password_hash, SecretString::new("hash-1"));
    assert_eq!(recent[0].created_at, minute(2));

    let all = repo.find_recent("user-1", 10).await.unwrap();
    assert_eq!(all.len(), 3);

    assert!(repo.find_recent("nobody", 5).await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn test_rate_limit_action_with_sqlite() {
    let pool = setup_db().await;
    let repo = SqliteLoginAttemptRepository::new(pool);
    let action = CheckRateLimitAction::new(repo.clone());

    for m in 0..5 {
        let decision = action
            .execute_at("a@b.com", false, minute(m))
            .await
            .unwrap();
        assert!(decision.is_allowed());
    }

    let blocked = action
        .execute_at("a@b.com", false, minute(5))
        .await
        .unwrap();
    assert_eq!(
        blocked,
        RateLimitDecision::LockedOut {
            lockout_until: minute(15)
        }
    );

    let after = action
        .execute_at("a@b.com", false, minute(16))
        .await
        .unwrap();
    assert_eq!(after.remaining_attempts(), Some(0));

    // five failures before the lockout, one after; the blocked attempt is not stored
    let stored = repo.find_attempts_since("a@b.com", minute(0)).await.unwrap();
    assert_eq!(stored.len(), 6);
}

#[tokio::test]
#[serial]
async fn test_rate_limit_action_rejects_empty_identifier() {
    let pool = setup_db().await;
    let repo = SqliteLoginAttemptRepository::new(pool);

    let err = CheckRateLimitAction::new(repo.clone())
        .execute("", false)
        .await
        .unwrap_err();
    assert_eq!(err, AuthError::Validation(ValidationError::IdentifierEmpty));

    let stored = repo.find_attempts_since("", minute(0)).await.unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
#[serial]
async fn test_validate_password_action_with_sqlite() {
    let pool = setup_db().await;
    let repo = SqlitePasswordHistoryRepository::new(pool);
    let action =
        ValidatePasswordAction::with_config(repo.clone(), PasswordHistoryConfig { max_history: 2 });

    let hash_a = SecretString::new("hash-a");
    let hash_b = SecretString::new("hash-b");
    let hash_c = SecretString::new("hash-c");

    assert_eq!(
        action.execute_at("user-1", &hash_a, minute(0)).await.unwrap(),
        PasswordReuseDecision::Valid
    );
    assert_eq!(
        action.execute_at("user-1", &hash_a, minute(1)).await.unwrap(),
        PasswordReuseDecision::Reused
    );
    // rejection writes nothing
    assert_eq!(repo.find_recent("user-1", 10).await.unwrap().len(), 1);

    action.execute_at("user-1", &hash_b, minute(2)).await.unwrap();
    action.execute_at("user-1", &hash_c, minute(3)).await.unwrap();

    // hash-a has dropped out of the last two
    assert_eq!(
        action.execute_at("user-1", &hash_a, minute(4)).await.unwrap(),
        PasswordReuseDecision::Valid
    );
}

#[tokio::test]
#[serial]
async fn test_store_error_after_pool_closed() {
    let pool = setup_db().await;
    let repo = SqliteLoginAttemptRepository::new(pool.clone());
    pool.close().await;

    let err = repo
        .find_attempts_since("a@b.com", minute(0))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::DatabaseError(_)));
}
