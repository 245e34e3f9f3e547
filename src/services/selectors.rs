//! Fixed markup selectors for the results site.

use scraper::Selector;

use crate::error::{AppError, Result};

/// Substring identifying a seat results link on the index page.
pub const SEAT_LINK_MARKER: &str = "division_results.php";

/// Hyperlinks with a target.
pub const LINK: &str = "a[href]";

/// Descriptive text element holding the release date.
pub const RELEASE_DATE: &str = "p.card-subtitle";

/// Results tables: candidates first, seat totals second.
pub const RESULTS_TABLE: &str = "table.select-table";

const ROW: &str = "tr";
const CELL: &str = "td";

/// Compiled selectors shared by the discovery and extraction services.
#[derive(Debug, Clone)]
pub struct PageSelectors {
    pub link: Selector,
    pub release_date: Selector,
    pub results_table: Selector,
    pub row: Selector,
    pub cell: Selector,
}

impl PageSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            link: parse_selector(LINK)?,
            release_date: parse_selector(RELEASE_DATE)?,
            results_table: parse_selector(RESULTS_TABLE)?,
            row: parse_selector(ROW)?,
            cell: parse_selector(CELL)?,
        })
    }
}

pub(crate) fn parse_selector(s: &str) -> Result<Selector> {
    Selector::parse(s).map_err(|e| AppError::selector(s, format!("{e:?}")))
}
