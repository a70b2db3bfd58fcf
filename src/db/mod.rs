//! SQLite persistence for crawl snapshots and price history.

pub mod history;
pub mod snapshot;

use crate::error::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::debug;

/// Opens (creating if missing) the database and applies crate migrations.
pub async fn connect(db_path: &str) -> Result<SqlitePool> {
    if let Some(parent) = Path::new(db_path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new().filename(db_path).create_if_missing(true);
    let pool = SqlitePoolOptions::new().connect_with(options).await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    debug!("Database ready at {}", db_path);
    Ok(pool)
}
