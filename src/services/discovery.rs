// src/services/discovery.rs

//! Seat URL discovery.
//!
//! Reads the results index page and collects the absolute URL of every
//! per-seat results page it links to.

use scraper::Html;
use url::Url;

use crate::error::Result;
use crate::services::selectors::{PageSelectors, SEAT_LINK_MARKER};
use crate::utils::http::PageFetcher;
use crate::utils::resolve_url;

/// Service for discovering seat result pages.
pub struct SeatDiscovery<'a> {
    fetcher: &'a dyn PageFetcher,
    selectors: &'a PageSelectors,
    base_url: Url,
}

impl<'a> SeatDiscovery<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        selectors: &'a PageSelectors,
        base_url: &str,
    ) -> Result<Self> {
        Ok(Self {
            fetcher,
            selectors,
            base_url: Url::parse(base_url)?,
        })
    }

    /// Fetch the index page and return seat URLs in page order.
    ///
    /// Any failure is logged and yields an empty list.
    pub async fn discover(&self, index_url: &str) -> Vec<String> {
        let html = match self.fetcher.fetch(index_url).await {
            Ok(html) => html,
            Err(e) => {
                log::error!("Error fetching seat URLs from the main page: {}", e);
                return Vec::new();
            }
        };

        let document = Html::parse_document(&html);
        let urls = self.extract_seat_urls(&document);
        log::info!("Discovered {} seat pages on {}", urls.len(), index_url);
        urls
    }

    /// Collect seat links from a parsed index page. Duplicates are kept.
    pub fn extract_seat_urls(&self, document: &Html) -> Vec<String> {
        document
            .select(&self.selectors.link)
            .filter_map(|a| a.value().attr("href"))
            .filter(|href| href.contains(SEAT_LINK_MARKER))
            .map(|href| resolve_url(&self.base_url, href))
            .collect()
    }
}
