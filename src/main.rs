//! m2-crawler - Metin2 third-party store crawler CLI
//!
//! Crawls the metin2alerts store page through a WebDriver session and keeps
//! price snapshots and history in SQLite.

use anyhow::Result;
use clap::{Parser, Subcommand};
use m2_crawler::market::servers;
use m2_crawler::Config;
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "m2-crawler",
    version,
    about = "Metin2 store crawler and price-history tracker",
    long_about = "Crawls the metin2alerts third-party store through a WebDriver browser \
session, snapshots listings into SQLite, and tracks per-item price history."
)]
struct Cli {
    /// Realm to crawl
    #[arg(short, long, global = true)]
    server: Option<String>,

    /// WebDriver endpoint URL
    #[arg(long, global = true)]
    webdriver_url: Option<String>,

    /// SQLite database path
    #[arg(long, global = true)]
    db: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Crawl listings for an item and record price history
    #[command(alias = "c")]
    Crawl {
        /// Item name to search for (slang names are expanded)
        query: String,
    },

    /// List known realms
    Servers,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(server) = cli.server {
        config.server = server;
    }
    if let Some(url) = cli.webdriver_url {
        config.webdriver_url = url;
    }
    if let Some(db) = cli.db {
        config.db_path = db;
    }

    match cli.command {
        Commands::Crawl { query } => {
            let report = m2_crawler::run_pass(&config, &query).await?;
            for line in report.log_lines() {
                println!("{}", line);
            }
            if !report.is_success() {
                std::process::exit(1);
            }
        }

        Commands::Servers => {
            println!("Known realms:\n");
            println!("{:<16} {:<8}", "Name", "Code");
            println!("{:-<16} {:-<8}", "", "");

            for (name, code) in servers::all() {
                println!("{:<16} {:<8}", name, code);
            }
        }
    }

    Ok(())
}
