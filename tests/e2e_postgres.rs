// these tests use #[serial] to run sequentially because setup_db() truncates
// all tables before each test. without serial, parallel tests would interfere
// with each other's data.
#![allow(clippy::indexing_slicing)]

//! End-to-end tests for `PostgreSQL` repositories.
//!
//! These tests require a running `PostgreSQL` database reachable through
//! `DATABASE_URL`. They return early when it is unset.
//! Run with: `cargo test --features sqlx_postgres --test e2e_postgres`

#![cfg(feature = "sqlx_postgres")]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use carelock::actions::{CheckRateLimitAction, PasswordReuseDecision, ValidatePasswordAction};
use carelock::postgres::{
    create_repositories, migrations, PostgresLoginAttemptRepository,
    PostgresPasswordHistoryRepository,
};
use carelock::{LoginAttemptRepository, PasswordHistoryRepository, SecretString};
use chrono::{DateTime, Duration, TimeZone, Utc};
use serial_test::serial;
use sqlx::postgres::PgPoolOptions;

async fn setup_db() -> Option<(PostgresLoginAttemptRepository, PostgresPasswordHistoryRepository)>
{
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("DATABASE_URL not set, skipping");
        return None;
    };

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to database");

    migrations::run(&pool)
        .await
        .expect("Failed to run migrations");

    // Clean up tables before each test
    sqlx::query("TRUNCATE login_attempts, password_history")
        .execute(&pool)
        .await
        .expect("Failed to truncate tables");

    Some(create_repositories(pool))
}

fn minute(m: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(m)
}

#[tokio::test]
#[serial]
async fn test_login_attempt_repository() {
    let Some((repo, _)) = setup_db().await else {
        return;
    };

    repo.record_attempt("a@b.com", false, minute(0)).await.unwrap();
    repo.record_attempt("a@b.com", true, minute(5)).await.unwrap();
    repo.record_attempt("a@b.com", false, minute(10)).await.unwrap();
    repo.record_attempt("A@B.com", false, minute(10)).await.unwrap();

    let attempts = repo.find_attempts_since("a@b.com", minute(0)).await.unwrap();
    assert_eq!(attempts.len(), 3);
    assert_eq!(attempts[0].attempted_at, minute(10));
    assert_eq!(attempts[2].attempted_at, minute(0));

    let attempts = repo.find_attempts_since("a@b.com", minute(5)).await.unwrap();
    assert_eq!(attempts.len(), 2);
    assert!(attempts[1].success);
}

#[tokio::test]
#[serial]
async fn test_password_history_repository() {
    let Some((_, repo)) = setup_db().await else {
        return;
    };

    for i in 0..3 {
        repo.append("user-1", &SecretString::new(format!("hash-{i}")), minute(i))
            .await
            .unwrap();
    }

    let recent = repo.find_recent("user-1", 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].password_hash, SecretString::new("hash-2"));
    assert_eq!(recent[1].password_hash, SecretString::new("hash-1"));
}

#[tokio::test]
#[serial]
async fn test_lockout_with_postgres() {
    let Some((repo, _)) = setup_db().await else {
        return;
    };
    let action = CheckRateLimitAction::new(repo.clone());

    for m in 0..5 {
        action
            .execute_at("a@b.com", false, minute(m))
            .await
            .unwrap();
    }

    let blocked = action
        .execute_at("a@b.com", false, minute(5))
        .await
        .unwrap();
    assert_eq!(blocked.lockout_until(), Some(minute(15)));

    let after = action
        .execute_at("a@b.com", false, minute(16))
        .await
        .unwrap();
    assert_eq!(after.remaining_attempts(), Some(0));

    let stored = repo.find_attempts_since("a@b.com", minute(0)).await.unwrap();
    assert_eq!(stored.len(), 6);
}

#[tokio::test]
#[serial]
async fn test_password_reuse_with_postgres() {
    let Some((_, repo)) = setup_db().await else {
        return;
    };
    let action = ValidatePasswordAction::new(repo);
    let hash = SecretString::new("hash-a");

    assert_eq!(
        action.execute_at("user-1", &hash, minute(0)).await.unwrap(),
        PasswordReuseDecision::Valid
    );
    assert_eq!(
        action.execute_at("user-1", &hash, minute(1)).await.unwrap(),
        PasswordReuseDecision::Reused
    );
}

#[tokio::test]
#[serial]
async fn test_long_identifiers_are_stored() {
    let Some((repo, history)) = setup_db().await else {
        return;
    };
    let identifier = format!("{}@ward7.example.org", "n".repeat(400));
    let user_id = "u".repeat(400);

    let decision = CheckRateLimitAction::new(repo.clone())
        .execute_at(&identifier, false, minute(0))
        .await
        .unwrap();
    assert_eq!(decision.remaining_attempts(), Some(4));
    assert_eq!(
        repo.find_attempts_since(&identifier, minute(0))
            .await
            .unwrap()
            .len(),
        1
    );

    history
        .append(&user_id, &SecretString::new("hash-a"), minute(0))
        .await
        .unwrap();
    assert_eq!(history.find_recent(&user_id, 5).await.unwrap().len(), 1);
}
