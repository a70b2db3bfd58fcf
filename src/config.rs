//! Configuration management with TOML, environment variables, and CLI overrides.

use crate::market::servers;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Application configuration with layered loading. Always passed explicitly
/// into the pipeline entry point; nothing reads process environment at run
/// time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Realm to crawl
    #[serde(default = "default_server")]
    pub server: String,

    /// Store page URL
    #[serde(default = "default_store_url")]
    pub store_url: String,

    /// WebDriver endpoint (chromedriver/geckodriver)
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// SQLite database path
    #[serde(default = "default_db_path")]
    pub db_path: String,

    /// Directory for per-item history JSON exports
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,

    /// Base settle delay after navigation/typing/clicks in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,

    /// Random jitter added to the settle delay (0 to this value)
    #[serde(default = "default_delay_jitter_ms")]
    pub delay_jitter_ms: u64,

    /// Upper bound for each wait-for-element step in seconds
    #[serde(default = "default_wait_timeout_secs")]
    pub wait_timeout_secs: u64,
}

fn default_server() -> String {
    servers::DEFAULT_SERVER.to_string()
}

fn default_store_url() -> String {
    "https://metin2alerts.com/store".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:9515".to_string()
}

fn default_db_path() -> String {
    "data/market.db".to_string()
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("data/exports")
}

fn default_delay_ms() -> u64 {
    1500
}

fn default_delay_jitter_ms() -> u64 {
    500
}

fn default_wait_timeout_secs() -> u64 {
    5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: default_server(),
            store_url: default_store_url(),
            webdriver_url: default_webdriver_url(),
            db_path: default_db_path(),
            export_dir: default_export_dir(),
            delay_ms: default_delay_ms(),
            delay_jitter_ms: default_delay_jitter_ms(),
            wait_timeout_secs: default_wait_timeout_secs(),
        }
    }
}

impl Config {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading config from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Loads configuration with fallback to default locations.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        // 1. Explicit path takes precedence
        if let Some(path) = explicit_path {
            return Self::from_file(path);
        }

        // 2. Try current directory
        let local_config = Path::new("config.toml");
        if local_config.exists() {
            debug!("Found config.toml in current directory");
            return Self::from_file(local_config);
        }

        // 3. Try XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("m2-crawler").join("config.toml");
            if xdg_config.exists() {
                debug!("Found config in XDG config directory");
                return Self::from_file(xdg_config);
            }
        }

        // 4. Return default config
        debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Applies environment variable overrides.
    pub fn with_env(mut self) -> Self {
        if let Ok(server) = std::env::var("M2_SERVER") {
            self.server = server;
        }

        if let Ok(url) = std::env::var("M2_WEBDRIVER_URL") {
            self.webdriver_url = url;
        }

        if let Ok(path) = std::env::var("M2_DB_PATH") {
            self.db_path = path;
        }

        if let Ok(delay) = std::env::var("M2_DELAY") {
            if let Ok(d) = delay.parse() {
                self.delay_ms = d;
            }
        }

        self
    }
}
