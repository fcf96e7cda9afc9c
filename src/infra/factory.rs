use std::sync::Arc;

use crate::config::Config;
use crate::infra::db::{PostgresDb, SqliteDb};
use crate::infra::repositories::{
    postgres_booking_repo::PostgresBookingRepo, postgres_event_repo::PostgresEventRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_event_repo::SqliteEventRepo,
};
use crate::state::AppState;

/// Picks the storage backend from the URL scheme. Nothing connects here: the
/// handles connect lazily on first use, so an unset `DATABASE_URL` still
/// yields a working state whose requests fail with a connection error.
pub fn bootstrap_state(config: &Config) -> AppState {
    let is_postgres = config
        .database_url
        .as_deref()
        .is_some_and(|url| url.starts_with("postgres://") || url.starts_with("postgresql://"));

    if is_postgres {
        let db = Arc::new(PostgresDb::new(config.database_url.clone()));

        AppState {
            config: config.clone(),
            event_repo: Arc::new(PostgresEventRepo::new(db.clone())),
            booking_repo: Arc::new(PostgresBookingRepo::new(db)),
        }
    } else {
        let db = Arc::new(SqliteDb::new(config.database_url.clone()));

        AppState {
            config: config.clone(),
            event_repo: Arc::new(SqliteEventRepo::new(db.clone())),
            booking_repo: Arc::new(SqliteBookingRepo::new(db)),
        }
    }
}
