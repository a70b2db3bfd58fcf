//! Ingestion pipeline orchestrator.
//!
//! One run drives a single browser session through every expanded query:
//! search, paginate, extract, dedup, snapshot, aggregate. Query-level failures
//! are recorded and skipped; only session-level failures abort the run. The
//! browser is released on every exit path.

pub mod dedup;

use crate::config::Config;
use crate::db;
use crate::error::{MarketError, Result};
use crate::market::browser::{StoreDriver, WebSession};
use crate::market::models::RawListing;
use crate::market::parser::Parser;
use crate::market::{queries, servers};
use chrono::Utc;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::{info, warn};

/// Outcome of one expanded query within a run.
#[derive(Debug, Clone, Serialize)]
pub struct QueryOutcome {
    pub query: String,
    /// Deduplicated listings persisted for this query's scope
    pub listings: usize,
    /// History points appended for this query's scope
    pub history_points: usize,
    pub error: Option<String>,
}

/// Report of one ingestion pass, exposed to the CLI / any supervisor.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub server: String,
    pub outcomes: Vec<QueryOutcome>,
}

impl RunReport {
    fn new(server: impl Into<String>) -> Self {
        Self { server: server.into(), outcomes: Vec::new() }
    }

    fn record(&mut self, query: String, listings: usize, history_points: usize) {
        self.outcomes.push(QueryOutcome { query, listings, history_points, error: None });
    }

    fn fail(&mut self, query: String, error: &MarketError) {
        warn!("Query '{}' failed: {}", query, error);
        self.outcomes.push(QueryOutcome {
            query,
            listings: 0,
            history_points: 0,
            error: Some(error.to_string()),
        });
    }

    /// True when every query completed without error.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.error.is_none())
    }

    pub fn listings_saved(&self) -> usize {
        self.outcomes.iter().map(|o| o.listings).sum()
    }

    pub fn history_points(&self) -> usize {
        self.outcomes.iter().map(|o| o.history_points).sum()
    }

    /// Human-readable summary lines.
    pub fn log_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.outcomes.len() + 1);
        for outcome in &self.outcomes {
            match &outcome.error {
                Some(err) => lines.push(format!("[{}] '{}': FAILED ({})", self.server, outcome.query, err)),
                None => lines.push(format!(
                    "[{}] '{}': {} listings, {} history points",
                    self.server, outcome.query, outcome.listings, outcome.history_points
                )),
            }
        }
        lines.push(format!(
            "[{}] total: {} listings saved, {} history points, {}/{} queries ok",
            self.server,
            self.listings_saved(),
            self.history_points(),
            self.outcomes.iter().filter(|o| o.error.is_none()).count(),
            self.outcomes.len()
        ));
        lines
    }
}

/// Runs one ingestion pass for (query, server) with a real browser session.
pub async fn run_pass(config: &Config, query: &str) -> Result<RunReport> {
    let pool = db::connect(&config.db_path).await?;
    let mut driver = WebSession::connect(config).await?;

    let report = run_pass_with(&mut driver, &pool, config, query).await;

    // Release the browser regardless of how the run ended.
    if let Err(e) = driver.close().await {
        warn!("Failed to close browser session: {}", e);
    }
    report
}

/// Runs one ingestion pass against an already-connected driver and pool.
/// Seam for integration tests with a mock driver.
pub async fn run_pass_with<D: StoreDriver>(
    driver: &mut D,
    pool: &SqlitePool,
    config: &Config,
    query: &str,
) -> Result<RunReport> {
    let expanded = queries::expand(query);
    info!("Planned search queue for '{}': {:?}", query, expanded);

    driver.open(&config.store_url).await?;
    driver.select_server(servers::selector_code(&config.server)).await?;

    let parser = Parser::new();
    let mut report = RunReport::new(&config.server);

    for current in expanded {
        info!("Processing query: '{}'", current);

        if let Err(e) = driver.search(&current).await {
            report.fail(current, &e);
            continue;
        }

        let collected = paginate(driver, &parser, &current).await;
        let unique = dedup::dedup(collected);

        let saved = match db::snapshot::replace_scope(
            pool,
            &config.server,
            &current,
            &unique,
            Utc::now(),
        )
        .await
        {
            Ok(n) => n,
            Err(e) => {
                report.fail(current, &e);
                continue;
            }
        };

        match db::history::record(pool, &current, &config.export_dir).await {
            Ok(stats) => report.record(current, saved, stats.len()),
            Err(e) => report.fail(current, &e),
        }
    }

    Ok(report)
}

/// Walks the result pages for the current query, extracting rows until the
/// no-data indicator, an empty table, or an exhausted pager. A step failure
/// (timeout, stale element) ends this query's pagination, not the session.
async fn paginate<D: StoreDriver>(
    driver: &mut D,
    parser: &Parser,
    query: &str,
) -> Vec<RawListing> {
    let mut collected = Vec::new();
    let mut page_num = 1;

    loop {
        let html = match driver.page_source().await {
            Ok(html) => html,
            Err(e) => {
                warn!("Page {} for '{}' unreadable, ending pagination: {}", page_num, query, e);
                break;
            }
        };

        let page = parser.parse_page(&html);
        if page.is_end() {
            info!("Pagination for '{}' ended on page {} (no data)", query, page_num);
            break;
        }

        info!("Page {} for '{}': {} rows", page_num, query, page.rows_seen);
        collected.extend(page.listings);

        match driver.next_page().await {
            Ok(true) => page_num += 1,
            Ok(false) => break,
            Err(e) => {
                warn!("Next-page step failed for '{}', ending pagination: {}", query, e);
                break;
            }
        }
    }

    collected
}
