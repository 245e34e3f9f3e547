//! Local filesystem CSV storage.
//!
//! Columns are the candidate fields followed by every seat total that is
//! present on at least one record; cells for totals a seat did not report
//! are left blank.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::{AggregateField, CombinedRecord};
use crate::storage::{DatasetStorage, WriteSummary};

/// Candidate columns, always written.
const BASE_COLUMNS: [&str; 7] = [
    "District",
    "Seat",
    "Release_date",
    "Candidate_name",
    "Party_abbreviation",
    "Votes_received",
    "Percentage",
];

/// CSV file storage backend.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    /// Create a storage writing to the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl DatasetStorage for CsvStorage {
    async fn write_dataset(&self, records: &[CombinedRecord]) -> Result<WriteSummary> {
        let (bytes, columns) = render_csv(records)?;
        self.write_bytes(&bytes).await?;

        log::info!(
            "Dataset: {} rows written to {}",
            records.len(),
            self.path.display()
        );

        Ok(WriteSummary {
            path: self.path.clone(),
            record_count: records.len(),
            columns,
        })
    }
}

/// Serialize records to CSV, returning the bytes and the header row.
pub fn render_csv(records: &[CombinedRecord]) -> Result<(Vec<u8>, Vec<String>)> {
    let totals: Vec<AggregateField> = AggregateField::ALL
        .into_iter()
        .filter(|field| records.iter().any(|r| r.aggregate(*field).is_some()))
        .collect();

    let columns: Vec<String> = BASE_COLUMNS
        .iter()
        .map(|c| c.to_string())
        .chain(totals.iter().map(|f| f.column_name().to_string()))
        .collect();

    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());
    writer.write_record(&columns)?;

    for record in records {
        let mut row = vec![
            record.district.clone(),
            record.seat.clone(),
            record.release_date.clone(),
            record.candidate_name.clone(),
            record.party_abbreviation.clone(),
            record.votes_received.to_string(),
            format_percentage(record.percentage),
        ];
        row.extend(
            totals
                .iter()
                .map(|f| record.aggregate(*f).map(|v| v.to_string()).unwrap_or_default()),
        );
        writer.write_record(&row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Io(std::io::Error::other(e.to_string())))?;
    Ok((bytes, columns))
}

/// Shortest round-trip form, always with a decimal point (`55.0`).
fn format_percentage(value: f64) -> String {
    format!("{value:?}")
}
