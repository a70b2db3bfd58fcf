//! WebDriver session against the store page.
//!
//! One session is used sequentially for all expanded queries of a run; the
//! search box and realm selector are shared page state, so no parallel tabs.

use crate::config::Config;
use crate::error::{MarketError, Result};
use crate::market::selectors::ui;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use rand::RngExt;
use std::time::Duration;
use tracing::{debug, info, warn};

/// WebDriver code for the Enter key.
const ENTER_KEY: &str = "\u{E007}";

/// Browser-session primitives the crawl loop drives - enables an in-process
/// mock for pipeline tests.
#[async_trait]
pub trait StoreDriver: Send {
    /// Navigates to the store and waits for it to settle. Session-fatal on
    /// failure.
    async fn open(&mut self, url: &str) -> Result<()>;

    /// Sets the realm selector to the given option code. Best-effort: a
    /// missing selector control logs and proceeds un-scoped.
    async fn select_server(&mut self, code: &str) -> Result<()>;

    /// Clears the search box, types the query, and submits it. A missing
    /// search control fails the current query only.
    async fn search(&mut self, query: &str) -> Result<()>;

    /// Returns the current page source for row extraction.
    async fn page_source(&mut self) -> Result<String>;

    /// Clicks the next-page control if present and enabled. `Ok(false)` ends
    /// pagination for the current query.
    async fn next_page(&mut self) -> Result<bool>;

    /// Releases the browser. Called on every exit path.
    async fn close(&mut self) -> Result<()>;
}

/// Real WebDriver session backed by fantoccini.
pub struct WebSession {
    client: Client,
    wait_timeout: Duration,
    delay_ms: u64,
    delay_jitter_ms: u64,
}

impl WebSession {
    /// Connects to the WebDriver endpoint configured in `config`.
    pub async fn connect(config: &Config) -> Result<Self> {
        debug!("Connecting to webdriver at {}", config.webdriver_url);
        let client = ClientBuilder::native().connect(&config.webdriver_url).await?;
        Ok(Self {
            client,
            wait_timeout: Duration::from_secs(config.wait_timeout_secs),
            delay_ms: config.delay_ms,
            delay_jitter_ms: config.delay_jitter_ms,
        })
    }

    /// Waits out dynamic table updates, with jitter to avoid a mechanical
    /// request cadence.
    async fn settle(&self) {
        let jitter = if self.delay_jitter_ms > 0 {
            rand::rng().random_range(0..=self.delay_jitter_ms)
        } else {
            0
        };
        tokio::time::sleep(Duration::from_millis(self.delay_ms + jitter)).await;
    }
}

#[async_trait]
impl StoreDriver for WebSession {
    async fn open(&mut self, url: &str) -> Result<()> {
        info!("Opening store: {}", url);
        self.client
            .goto(url)
            .await
            .map_err(|e| MarketError::Session(format!("navigation to {} failed: {}", url, e)))?;
        self.settle().await;
        Ok(())
    }

    async fn select_server(&mut self, code: &str) -> Result<()> {
        let select = match self
            .client
            .wait()
            .at_most(self.wait_timeout)
            .for_element(Locator::Css(ui::SERVER_SELECT))
            .await
        {
            Ok(el) => el,
            Err(e) => {
                warn!("Realm selector not found, proceeding un-scoped: {}", e);
                return Ok(());
            }
        };

        if let Err(e) = select.select_by_value(code).await {
            warn!("Could not select realm option {}: {}", code, e);
            return Ok(());
        }

        debug!("Realm selected (option {})", code);
        self.settle().await;
        Ok(())
    }

    async fn search(&mut self, query: &str) -> Result<()> {
        let input = self
            .client
            .wait()
            .at_most(self.wait_timeout)
            .for_element(Locator::Css(ui::SEARCH_INPUT))
            .await
            .map_err(|e| MarketError::Ui(format!("search input not found: {}", e)))?;

        input.click().await?;
        input.clear().await?;
        input.send_keys(query).await?;
        input.send_keys(ENTER_KEY).await?;

        debug!("Submitted search: {}", query);
        self.settle().await;
        Ok(())
    }

    async fn page_source(&mut self) -> Result<String> {
        Ok(self.client.source().await?)
    }

    async fn next_page(&mut self) -> Result<bool> {
        let button = match self.client.find(Locator::XPath(ui::NEXT_BUTTON)).await {
            Ok(el) => el,
            Err(_) => return Ok(false),
        };

        if !button.is_displayed().await.unwrap_or(false) {
            return Ok(false);
        }
        if button.attr("disabled").await?.is_some() {
            return Ok(false);
        }

        button.click().await?;
        self.settle().await;
        Ok(true)
    }

    async fn close(&mut self) -> Result<()> {
        self.client.clone().close().await?;
        Ok(())
    }
}
