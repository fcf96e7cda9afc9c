use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, PgPool, SqlitePool};
use tokio::sync::OnceCell;
use tracing::info;
use tracing::log::LevelFilter;

use crate::error::AppError;

/// Lazily initialized SQLite handle: the first caller connects, runs the
/// embedded migrations and caches the pool; every later caller reuses it.
/// A missing or bad `DATABASE_URL` therefore surfaces per-request as a
/// connection error instead of failing process startup.
pub struct SqliteDb {
    url: Option<String>,
    pool: OnceCell<SqlitePool>,
}

impl SqliteDb {
    pub fn new(url: Option<String>) -> Self {
        Self { url, pool: OnceCell::new() }
    }

    pub async fn pool(&self) -> Result<&SqlitePool, AppError> {
        self.pool
            .get_or_try_init(|| async {
                let url = self
                    .url
                    .as_deref()
                    .ok_or_else(|| AppError::Connection("DATABASE_URL is not set".into()))?;

                info!("Initializing SQLite connection with WAL mode...");

                let opts = SqliteConnectOptions::from_str(url)
                    .map_err(|e| AppError::Connection(e.to_string()))?
                    .create_if_missing(true)
                    .journal_mode(SqliteJournalMode::Wal)
                    .busy_timeout(Duration::from_secs(5))
                    .log_statements(LevelFilter::Debug)
                    .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

                let pool = SqlitePoolOptions::new()
                    .max_connections(5)
                    .connect_with(opts)
                    .await
                    .map_err(|e| AppError::Connection(e.to_string()))?;

                sqlx::migrate!("./migrations/sqlite")
                    .run(&pool)
                    .await
                    .map_err(|e| AppError::Connection(e.to_string()))?;

                Ok(pool)
            })
            .await
    }
}

/// PostgreSQL counterpart of [`SqliteDb`], same connect-once semantics.
pub struct PostgresDb {
    url: Option<String>,
    pool: OnceCell<PgPool>,
}

impl PostgresDb {
    pub fn new(url: Option<String>) -> Self {
        Self { url, pool: OnceCell::new() }
    }

    pub async fn pool(&self) -> Result<&PgPool, AppError> {
        self.pool
            .get_or_try_init(|| async {
                let url = self
                    .url
                    .as_deref()
                    .ok_or_else(|| AppError::Connection("DATABASE_URL is not set".into()))?;

                info!("Initializing PostgreSQL connection...");

                let opts: PgConnectOptions = url
                    .parse()
                    .map_err(|e: sqlx::Error| AppError::Connection(e.to_string()))?;
                let opts = opts
                    .log_statements(LevelFilter::Debug)
                    .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

                let pool = PgPoolOptions::new()
                    .max_connections(10)
                    .connect_with(opts)
                    .await
                    .map_err(|e| AppError::Connection(e.to_string()))?;

                sqlx::migrate!("./migrations/postgres")
                    .run(&pool)
                    .await
                    .map_err(|e| AppError::Connection(e.to_string()))?;

                Ok(pool)
            })
            .await
    }
}
