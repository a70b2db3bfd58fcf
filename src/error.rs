//! Error taxonomy for the ingestion pipeline.
//!
//! Parse failures never surface here - unparsable tokens become zero and bad
//! rows are dropped at the extraction boundary. Everything that can abort a
//! query or a session is typed below.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MarketError {
    /// A UI control could not be located or interacted with. Recovered at
    /// query granularity: the current query is skipped, the session continues.
    #[error("UI interaction failed: {0}")]
    Ui(String),

    /// Navigation or session-level browser failure. Aborts the remaining
    /// queries of the run.
    #[error("browser session error: {0}")]
    Session(String),

    #[error("webdriver error: {0}")]
    WebDriver(#[from] fantoccini::error::CmdError),

    #[error("webdriver connection error: {0}")]
    Connect(#[from] fantoccini::error::NewSessionError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("export I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, MarketError>;
