//! Election results crawler CLI
//!
//! Scrapes every seat results page linked from the index page and writes
//! one combined CSV dataset.

use std::path::PathBuf;

use clap::Parser;
use results_crawler::{
    error::Result,
    models::Config,
    pipeline,
    storage::CsvStorage,
    utils::http::HttpFetcher,
};

/// Election results crawler
#[derive(Parser, Debug)]
#[command(name = "results-crawler", version, about = "Seat-level election results scraper")]
struct Cli {
    /// Path to an optional TOML config file
    #[arg(short, long, default_value = "results.toml")]
    config: PathBuf,

    /// Only process the first `--test-limit` seats
    #[arg(long)]
    test_mode: bool,

    /// Number of seats processed in test mode
    #[arg(long)]
    test_limit: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = if cli.config.exists() {
        log::info!("Loaded configuration from {}", cli.config.display());
        Config::load_or_default(&cli.config)
    } else {
        Config::default()
    };

    if cli.test_mode {
        config.run.test_mode = true;
    }
    if let Some(limit) = cli.test_limit {
        config.run.test_limit = limit;
    }

    if let Err(e) = config.validate() {
        log::error!("Config validation failed: {}", e);
        return Err(e);
    }

    let fetcher = HttpFetcher::new(&config.crawler)?;
    let storage = CsvStorage::new(&config.output.dataset_path);

    pipeline::run_scraper(&config, &fetcher, &storage).await?;

    Ok(())
}
