//! HTTP server for the login-attempt lockout and password-reuse endpoints.
//!
//! # Usage
//!
//! ```bash
//! # In-memory SQLite, default limits
//! carelock-server
//!
//! # PostgreSQL (requires the `sqlx_postgres` feature)
//! DATABASE_URL=postgres://localhost/inventory carelock-server \
//!     --bind 0.0.0.0:8080 \
//!     --profile strict \
//!     --cors-origin https://inventory.example.org
//! ```

use std::net::SocketAddr;
use std::process::ExitCode;

use carelock::api::axum::{
    allowed_headers_on_responses, default_cors, edge_function_cors, guard_routes, AppState,
};
use carelock::events::listeners::TracingListener;
use carelock::{
    register_event_listeners, AuthError, GuardConfig, LoginAttemptRepository,
    PasswordHistoryRepository,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Lockout and reuse limits to run with.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Profile {
    /// 5 failures per 15 minutes, last 5 hashes.
    #[default]
    Default,
    /// 10 failures per 5 minutes, last hash only.
    Development,
    /// 3 failures per 30 minutes, last 10 hashes.
    Strict,
}

impl From<Profile> for GuardConfig {
    fn from(profile: Profile) -> Self {
        match profile {
            Profile::Default => GuardConfig::default(),
            Profile::Development => GuardConfig::development(),
            Profile::Strict => GuardConfig::strict(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "carelock-server")]
#[command(version, about = "Login lockout and password reuse endpoints")]
struct Cli {
    /// Address to listen on.
    #[arg(short, long, env = "BIND_ADDR", default_value = "127.0.0.1:8080")]
    bind: SocketAddr,

    /// `sqlite:` or `postgres://` connection string.
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite::memory:")]
    database_url: String,

    #[arg(short, long, value_enum, default_value = "default")]
    profile: Profile,

    /// Restrict CORS to these origins. Any origin is allowed when omitted.
    /// Can be specified multiple times.
    #[arg(long = "cors-origin", env = "CORS_ORIGINS", value_delimiter = ',')]
    cors_origins: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "carelock=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    register_event_listeners(|registry| {
        registry.listen(TracingListener);
    });

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AuthError> {
    if cli.database_url.starts_with("postgres://") || cli.database_url.starts_with("postgresql://")
    {
        return run_postgres(cli).await;
    }

    if !cli.database_url.starts_with("sqlite:") {
        return Err(AuthError::ConfigurationError(format!(
            "unsupported database url scheme: {}",
            cli.database_url
        )));
    }

    let pool = carelock::sqlite::connect(&cli.database_url)
        .await
        .map_err(|e| AuthError::ConfigurationError(e.to_string()))?;

    let (login_attempts, password_history) = carelock::sqlite::create_repositories(pool);
    serve(cli, login_attempts, password_history).await
}

#[cfg(feature = "sqlx_postgres")]
async fn run_postgres(cli: Cli) -> Result<(), AuthError> {
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&cli.database_url)
        .await
        .map_err(|e| AuthError::ConfigurationError(e.to_string()))?;

    carelock::postgres::migrations::run(&pool)
        .await
        .map_err(|e| AuthError::ConfigurationError(e.to_string()))?;

    let (login_attempts, password_history) = carelock::postgres::create_repositories(pool);
    serve(cli, login_attempts, password_history).await
}

#[cfg(not(feature = "sqlx_postgres"))]
async fn run_postgres(_cli: Cli) -> Result<(), AuthError> {
    Err(AuthError::ConfigurationError(
        "PostgreSQL support requires the sqlx_postgres feature".to_owned(),
    ))
}

async fn serve<L, H>(cli: Cli, login_attempts: L, password_history: H) -> Result<(), AuthError>
where
    L: LoginAttemptRepository + Clone + Send + Sync + 'static,
    H: PasswordHistoryRepository + Clone + Send + Sync + 'static,
{
    let state = AppState::with_config(login_attempts, password_history, cli.profile.into());

    let cors = if cli.cors_origins.is_empty() {
        edge_function_cors()
    } else {
        let origins: Vec<&str> = cli.cors_origins.iter().map(String::as_str).collect();
        default_cors(&origins)
    };

    let app = guard_routes()
        .layer(cors)
        .layer(allowed_headers_on_responses())
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(cli.bind)
        .await
        .map_err(|e| AuthError::ConfigurationError(format!("failed to bind {}: {e}", cli.bind)))?;

    tracing::info!(addr = %cli.bind, profile = ?cli.profile, "carelock listening");

    axum::serve(listener, app)
        .await
        .map_err(|e| AuthError::ConfigurationError(e.to_string()))
}
