// src/models/mod.rs

//! Domain models for the results crawler.

mod config;
mod fields;
mod record;

// Re-export all public types
pub use config::{Config, CrawlerConfig, OutputConfig, RunConfig, SiteConfig};
pub use fields::AggregateField;
pub use record::{AggregateRecord, CandidateRecord, CombinedRecord, SeatReference};
