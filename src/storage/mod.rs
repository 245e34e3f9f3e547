//! Storage abstractions for the scraped dataset.
//!
//! The whole dataset is written once, at the end of a run:
//!
//! ```text
//! out/
//! └── sl_2024_presidential_election_results_dataset.csv
//! ```

pub mod local;

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::CombinedRecord;

// Re-export for convenience
pub use local::CsvStorage;

/// Metadata about a dataset write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Where the dataset was written
    pub path: PathBuf,
    /// Number of data rows
    pub record_count: usize,
    /// Header row, in order
    pub columns: Vec<String>,
}

/// Trait for dataset sinks.
#[async_trait]
pub trait DatasetStorage: Send + Sync {
    /// Write every record as one table, replacing any previous output.
    async fn write_dataset(&self, records: &[CombinedRecord]) -> Result<WriteSummary>;
}
