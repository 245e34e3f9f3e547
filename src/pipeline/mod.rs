//! Pipeline entry points.
//!
//! - `run_scraper`: Discover seat pages, scrape each, write the dataset

pub mod scrape;

pub use scrape::{ScrapeOutcome, run_scraper};
