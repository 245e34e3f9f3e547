// src/services/seats.rs

//! Seat results extraction.
//!
//! Fetches one seat page and turns its two results tables into combined
//! records: one per candidate, each carrying the seat totals.

use std::time::Instant;

use scraper::{ElementRef, Html};

use crate::error::{AppError, Result};
use crate::models::{AggregateField, AggregateRecord, CandidateRecord, CombinedRecord, SeatReference};
use crate::services::selectors::PageSelectors;
use crate::utils::http::PageFetcher;

/// Minimum cells for a candidate row: name, party, votes, percentage.
const CANDIDATE_CELLS: usize = 4;

/// Minimum cells for a totals row: label, value.
const TOTAL_CELLS: usize = 2;

/// Service for scraping a single seat results page.
pub struct SeatScraper<'a> {
    fetcher: &'a dyn PageFetcher,
    selectors: &'a PageSelectors,
}

impl<'a> SeatScraper<'a> {
    pub fn new(fetcher: &'a dyn PageFetcher, selectors: &'a PageSelectors) -> Self {
        Self { fetcher, selectors }
    }

    /// Scrape one seat page.
    ///
    /// Fetch and structure failures are logged and produce no records, so a
    /// bad seat never affects the others.
    pub async fn scrape(&self, url: &str) -> Vec<CombinedRecord> {
        let start = Instant::now();

        match self.try_scrape(url).await {
            Ok(records) => {
                log::info!(
                    "Scraping successful for {} | {} rows | Time taken: {:.2} seconds",
                    url,
                    records.len(),
                    start.elapsed().as_secs_f64()
                );
                records
            }
            Err(e) => {
                log::error!(
                    "Failed to scrape {}: {} | Time taken: {:.2} seconds",
                    url,
                    e,
                    start.elapsed().as_secs_f64()
                );
                Vec::new()
            }
        }
    }

    async fn try_scrape(&self, url: &str) -> Result<Vec<CombinedRecord>> {
        let html = self.fetcher.fetch(url).await?;
        let seat_ref = SeatReference::from_url(url);
        self.parse_page(url, &html, &seat_ref)
    }

    /// Extract the combined records from a seat page body.
    pub fn parse_page(
        &self,
        url: &str,
        html: &str,
        seat_ref: &SeatReference,
    ) -> Result<Vec<CombinedRecord>> {
        let document = Html::parse_document(html);

        let release_date = document
            .select(&self.selectors.release_date)
            .next()
            .map(text_of)
            .ok_or_else(|| AppError::structure(url, "release date element not found"))?;

        let mut tables = document.select(&self.selectors.results_table);
        let candidate_table = tables.next();
        let totals_table = tables.next();

        let candidates = match candidate_table {
            Some(table) => self.parse_candidates(table, seat_ref, &release_date),
            None => {
                log::warn!("No candidate table found on {}", url);
                Vec::new()
            }
        };

        let mut aggregate = AggregateRecord::new(seat_ref, release_date);
        match totals_table {
            Some(table) => {
                log::debug!("Found second table on {}", url);
                self.parse_totals(table, &mut aggregate);
            }
            None => log::info!("No second table found on {}", url),
        }

        Ok(candidates
            .into_iter()
            .map(|candidate| candidate.merge(&aggregate))
            .collect())
    }

    fn parse_candidates(
        &self,
        table: ElementRef<'_>,
        seat_ref: &SeatReference,
        release_date: &str,
    ) -> Vec<CandidateRecord> {
        // First row is the header.
        table
            .select(&self.selectors.row)
            .skip(1)
            .filter_map(|row| {
                let cells: Vec<String> = row.select(&self.selectors.cell).map(text_of).collect();
                if cells.len() < CANDIDATE_CELLS {
                    return None;
                }

                Some(CandidateRecord {
                    district: seat_ref.district.clone(),
                    seat: seat_ref.seat.clone(),
                    release_date: release_date.to_string(),
                    candidate_name: cells[0].clone(),
                    party_abbreviation: cells[1].clone(),
                    votes_received: or_default(parse_votes(&cells[2])),
                    percentage: or_default(parse_percentage(&cells[3])),
                })
            })
            .collect()
    }

    fn parse_totals(&self, table: ElementRef<'_>, aggregate: &mut AggregateRecord) {
        let mut rows = 0;
        for row in table.select(&self.selectors.row) {
            rows += 1;
            let cells: Vec<String> = row.select(&self.selectors.cell).map(text_of).collect();
            if cells.len() < TOTAL_CELLS {
                continue;
            }

            match AggregateField::from_label(&cells[0]) {
                Some(field) => aggregate.set(field, or_default(parse_total(field, &cells[1]))),
                None => log::debug!("Unmapped totals label '{}'", cells[0]),
            }
        }
        log::debug!("Totals table rows found: {}", rows);
    }
}

/// Trimmed text content of an element.
fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Substitute the zero value for a failed coercion, with a warning.
fn or_default<T: Default>(value: Result<T>) -> T {
    value.unwrap_or_else(|e| {
        log::warn!("{}; using 0", e);
        T::default()
    })
}

/// Parse a vote count such as `12,345`.
pub fn parse_votes(raw: &str) -> Result<u64> {
    raw.trim()
        .replace(',', "")
        .parse()
        .map_err(|_| AppError::coercion("Votes_received", raw))
}

/// Parse a share such as `45.6%`.
pub fn parse_percentage(raw: &str) -> Result<f64> {
    raw.trim()
        .replace('%', "")
        .trim()
        .parse()
        .map_err(|_| AppError::coercion("Percentage", raw))
}

/// Parse a seat total. Only plain digit strings (after removing thousands
/// separators) are accepted.
pub fn parse_total(field: AggregateField, raw: &str) -> Result<u64> {
    let cleaned = raw.trim().replace(',', "");
    if cleaned.is_empty() || !cleaned.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::coercion(field.column_name(), raw));
    }
    cleaned
        .parse()
        .map_err(|_| AppError::coercion(field.column_name(), raw))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    const URL: &str = "https://results.elections.gov.lk/division_results.php?district=Galle&pd_division=Hiniduma";

    /// Serves one fixed body, or a 404 when empty.
    struct PageFetcherStub(Option<&'static str>);

    #[async_trait]
    impl PageFetcher for PageFetcherStub {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| AppError::status(url, 404))
        }
    }

    fn seat_ref() -> SeatReference {
        SeatReference::from_url(URL)
    }

    fn parse(html: &str) -> Result<Vec<CombinedRecord>> {
        let selectors = PageSelectors::new().unwrap();
        let fetcher = PageFetcherStub(None);
        SeatScraper::new(&fetcher, &selectors).parse_page(URL, html, &seat_ref())
    }

    const FULL_PAGE: &str = r#"
        <html><body>
          <p class="card-subtitle"> 2024-09-22 </p>
          <table class="select-table">
            <tr><th>Name</th><th>Party</th><th>Votes</th><th>%</th></tr>
            <tr><td> Alice </td><td>ABC</td><td>1,000</td><td>55.0%</td></tr>
            <tr><td>Bob</td><td>XYZ</td><td>800</td><td>44.4%</td></tr>
            <tr><td colspan="4">Footnote</td></tr>
          </table>
          <table class="select-table">
            <tr><td>Valid Votes</td><td>1,800</td><td>98%</td></tr>
            <tr><td>Rejected Votes</td><td>N/A</td></tr>
            <tr><td>Turnout</td><td>72%</td></tr>
            <tr><td>Total Electors</td><td>2,500</td></tr>
            <tr><td>orphan</td></tr>
          </table>
        </body></html>
    "#;

    #[test]
    fn test_parse_votes() {
        assert_eq!(parse_votes("12,345").unwrap(), 12345);
        assert_eq!(parse_votes(" 7 ").unwrap(), 7);
        assert!(parse_votes("-").is_err());
    }

    #[test]
    fn test_parse_percentage() {
        assert_eq!(parse_percentage("45.6%").unwrap(), 45.6);
        assert_eq!(parse_percentage("3.25 %").unwrap(), 3.25);
        assert!(parse_percentage("n/a").is_err());
    }

    #[test]
    fn test_parse_total() {
        assert_eq!(parse_total(AggregateField::ValidVotes, "1,800").unwrap(), 1800);
        assert!(parse_total(AggregateField::ValidVotes, "N/A").is_err());
        assert!(parse_total(AggregateField::ValidVotes, "").is_err());
        assert!(parse_total(AggregateField::ValidVotes, "-5").is_err());
        assert_eq!(or_default(parse_total(AggregateField::ValidVotes, "N/A")), 0);
    }

    #[test]
    fn test_full_page() {
        let records = parse(FULL_PAGE).unwrap();
        assert_eq!(records.len(), 2);

        let alice = &records[0];
        assert_eq!(alice.district, "Galle");
        assert_eq!(alice.seat, "Hiniduma");
        assert_eq!(alice.release_date, "2024-09-22");
        assert_eq!(alice.candidate_name, "Alice");
        assert_eq!(alice.party_abbreviation, "ABC");
        assert_eq!(alice.votes_received, 1000);
        assert_eq!(alice.percentage, 55.0);
        assert_eq!(alice.valid_votes_in_seat, Some(1800));
        assert_eq!(alice.rejected_votes_in_seat, Some(0));
        assert_eq!(alice.total_polled_in_seat, None);
        assert_eq!(alice.total_electors_in_seat, Some(2500));

        let bob = &records[1];
        assert_eq!(bob.candidate_name, "Bob");
        assert_eq!(bob.valid_votes_in_seat, alice.valid_votes_in_seat);
        assert_eq!(bob.total_electors_in_seat, alice.total_electors_in_seat);
    }

    #[test]
    fn test_missing_release_date_skips_seat() {
        let html = r#"
            <table class="select-table">
              <tr><th>Name</th></tr>
              <tr><td>Alice</td><td>ABC</td><td>1,000</td><td>55.0%</td></tr>
            </table>
        "#;
        let err = parse(html).unwrap_err();
        assert!(matches!(err, AppError::Structure { .. }));
    }

    #[test]
    fn test_candidates_without_totals_table() {
        let html = r#"
            <p class="card-subtitle">2024-09-22</p>
            <table class="select-table">
              <tr><th>Name</th></tr>
              <tr><td>Alice</td><td>ABC</td><td>1,000</td><td>55.0%</td></tr>
            </table>
        "#;
        let records = parse(html).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].candidate_name, "Alice");
        assert_eq!(records[0].votes_received, 1000);
        for field in AggregateField::ALL {
            assert_eq!(records[0].aggregate(field), None);
        }
    }

    #[test]
    fn test_no_tables_yields_nothing() {
        let records = parse(r#"<p class="card-subtitle">2024-09-22</p>"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_bad_vote_cell_defaults_to_zero() {
        let html = r#"
            <p class="card-subtitle">2024-09-22</p>
            <table class="select-table">
              <tr><th>Name</th></tr>
              <tr><td>Alice</td><td>ABC</td><td>pending</td><td>-</td></tr>
            </table>
        "#;
        let records = parse(html).unwrap();
        assert_eq!(records[0].votes_received, 0);
        assert_eq!(records[0].percentage, 0.0);
    }

    #[test]
    fn test_parse_is_repeatable() {
        assert_eq!(parse(FULL_PAGE).unwrap(), parse(FULL_PAGE).unwrap());
    }

    #[tokio::test]
    async fn test_scrape_fetch_failure_is_empty() {
        let selectors = PageSelectors::new().unwrap();
        let fetcher = PageFetcherStub(None);
        let records = SeatScraper::new(&fetcher, &selectors).scrape(URL).await;
        assert!(records.is_empty());
    }

    #[tokio::test]
    async fn test_scrape_uses_url_for_seat() {
        let selectors = PageSelectors::new().unwrap();
        let fetcher = PageFetcherStub(Some(FULL_PAGE));
        let records = SeatScraper::new(&fetcher, &selectors).scrape(URL).await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].seat, "Hiniduma");
    }
}
