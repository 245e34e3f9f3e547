// src/pipeline/scrape.rs

//! Seat results scraping pipeline.

use std::time::Duration;

use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{CombinedRecord, Config};
use crate::services::{PageSelectors, SeatDiscovery, SeatScraper};
use crate::storage::{DatasetStorage, WriteSummary};
use crate::utils::http::PageFetcher;
use crate::utils::log::{header, step, summary};

/// Summary of a scrape run.
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    /// Seat links found on the index page
    pub seats_discovered: usize,
    /// Seat pages visited (after any test-mode limit)
    pub seats_processed: usize,
    /// Seat pages that contributed at least one row
    pub seats_with_records: usize,
    /// Every row collected, in discovery order
    pub records: Vec<CombinedRecord>,
    /// Present when a dataset file was written
    pub written: Option<WriteSummary>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// Run the scraper: discover seats, scrape each in turn, write the dataset.
///
/// Seat failures are logged and skipped. Only a failed dataset write is
/// returned as an error.
pub async fn run_scraper(
    config: &Config,
    fetcher: &dyn PageFetcher,
    storage: &dyn DatasetStorage,
) -> Result<ScrapeOutcome> {
    let started_at = Utc::now();
    header("Election results crawler starting");

    let selectors = PageSelectors::new()?;
    let delay = Duration::from_millis(config.crawler.request_delay_ms);

    step(1, 3, "Discover - Reading seat links from index page");
    let discovery = SeatDiscovery::new(fetcher, &selectors, &config.site.base_url)?;
    let mut seat_urls = discovery.discover(&config.site.index_url).await;
    let seats_discovered = seat_urls.len();

    if let Some(limit) = config.seat_limit() {
        seat_urls.truncate(limit);
        log::info!(
            "Test mode: processing {} of {} seats",
            seat_urls.len(),
            seats_discovered
        );
    }

    step(2, 3, "Scrape - Fetching seat pages");
    let scraper = SeatScraper::new(fetcher, &selectors);
    let total = seat_urls.len();
    let mut dataset: Vec<CombinedRecord> = Vec::new();
    let mut seats_with_records = 0;

    for (i, url) in seat_urls.iter().enumerate() {
        log::debug!("[{}/{}] {}", i + 1, total, url);

        let records = scraper.scrape(url).await;
        if !records.is_empty() {
            seats_with_records += 1;
        }
        dataset.extend(records);

        if delay.as_millis() > 0 {
            tokio::time::sleep(delay).await;
        }
    }

    step(3, 3, "Save - Writing dataset");
    let written = if dataset.is_empty() {
        log::warn!("No combined data collected.");
        None
    } else {
        let write = storage.write_dataset(&dataset).await?;
        log::info!("Combined data saved successfully.");
        Some(write)
    };

    let finished_at = Utc::now();
    summary(
        "Scrape run",
        &[
            ("Seats discovered", seats_discovered.to_string()),
            ("Seats processed", total.to_string()),
            ("Seats with rows", seats_with_records.to_string()),
            ("Rows collected", dataset.len().to_string()),
            (
                "Output",
                written
                    .as_ref()
                    .map(|w| w.path.display().to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            (
                "Elapsed",
                format!("{}s", (finished_at - started_at).num_seconds()),
            ),
        ],
    );
    log::info!("Data scraping and saving completed!");

    Ok(ScrapeOutcome {
        seats_discovered,
        seats_processed: total,
        seats_with_records,
        records: dataset,
        written,
        started_at,
        finished_at,
    })
}
