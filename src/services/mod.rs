//! Service layer for the results crawler.
//!
//! This module contains the scraping logic for:
//! - Seat page discovery (`SeatDiscovery`)
//! - Seat results extraction (`SeatScraper`)
//! - Fixed markup selectors (`PageSelectors`)

mod discovery;
mod seats;
pub mod selectors;

pub use discovery::SeatDiscovery;
pub use seats::{SeatScraper, parse_percentage, parse_total, parse_votes};
pub use selectors::PageSelectors;
