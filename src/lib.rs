//! m2-crawler - Metin2 third-party store crawler and price-history tracker
//!
//! Drives a WebDriver browser session through the metin2alerts store page,
//! extracts listings from the rendered table, and maintains a SQLite database
//! of current snapshots plus per-item price history with JSON exports.

pub mod config;
pub mod db;
pub mod error;
pub mod market;
pub mod pipeline;

pub use config::Config;
pub use error::{MarketError, Result};
pub use market::models::{HistoryPoint, PriceStats, RawListing};
pub use pipeline::{run_pass, RunReport};
