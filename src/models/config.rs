//! Application configuration structures.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// HTTP and pacing settings
    #[serde(default)]
    pub crawler: CrawlerConfig,

    /// Results site locations
    #[serde(default)]
    pub site: SiteConfig,

    /// Dataset output settings
    #[serde(default)]
    pub output: OutputConfig,

    /// Run mode knobs
    #[serde(default)]
    pub run: RunConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.crawler.user_agent.trim().is_empty() {
            return Err(AppError::validation("crawler.user_agent is empty"));
        }
        if self.crawler.timeout_secs == 0 {
            return Err(AppError::validation("crawler.timeout_secs must be > 0"));
        }
        Url::parse(&self.site.base_url)
            .map_err(|e| AppError::validation(format!("site.base_url is invalid: {e}")))?;
        Url::parse(&self.site.index_url)
            .map_err(|e| AppError::validation(format!("site.index_url is invalid: {e}")))?;
        if self.output.dataset_path.as_os_str().is_empty() {
            return Err(AppError::validation("output.dataset_path is empty"));
        }
        if self.run.test_mode && self.run.test_limit == 0 {
            return Err(AppError::validation(
                "run.test_limit must be > 0 in test mode",
            ));
        }
        Ok(())
    }

    /// Maximum number of seat pages to process, if limited.
    pub fn seat_limit(&self) -> Option<usize> {
        self.run.test_mode.then_some(self.run.test_limit)
    }
}

/// HTTP client and pacing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlerConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Pause after every seat page in milliseconds
    #[serde(default = "defaults::request_delay")]
    pub request_delay_ms: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            request_delay_ms: defaults::request_delay(),
        }
    }
}

/// Locations on the results website.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Origin that relative seat links are resolved against
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Page listing every seat
    #[serde(default = "defaults::index_url")]
    pub index_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            index_url: defaults::index_url(),
        }
    }
}

/// Dataset output settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::dataset_path")]
    pub dataset_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dataset_path: defaults::dataset_path(),
        }
    }
}

/// Run mode knobs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Restrict the run to the first `test_limit` seats
    #[serde(default)]
    pub test_mode: bool,

    #[serde(default = "defaults::test_limit")]
    pub test_limit: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            test_mode: false,
            test_limit: defaults::test_limit(),
        }
    }
}

mod defaults {
    use std::path::PathBuf;

    // Crawler defaults
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; results-crawler/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn request_delay() -> u64 {
        2000
    }

    // Site defaults
    pub fn base_url() -> String {
        "https://results.elections.gov.lk/".into()
    }
    pub fn index_url() -> String {
        "https://results.elections.gov.lk".into()
    }

    // Output defaults
    pub fn dataset_path() -> PathBuf {
        PathBuf::from("out/sl_2024_presidential_election_results_dataset.csv")
    }

    // Run defaults
    pub fn test_limit() -> usize {
        5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.crawler.request_delay_ms, 2000);
        assert_eq!(config.run.test_limit, 5);
        assert_eq!(
            config.output.dataset_path,
            PathBuf::from("out/sl_2024_presidential_election_results_dataset.csv")
        );
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [run]
            test_mode = true

            [crawler]
            request_delay_ms = 0
            "#,
        )
        .unwrap();

        assert!(config.run.test_mode);
        assert_eq!(config.run.test_limit, 5);
        assert_eq!(config.crawler.request_delay_ms, 0);
        assert_eq!(config.crawler.timeout_secs, 30);
        assert_eq!(config.site.base_url, "https://results.elections.gov.lk/");
    }

    #[test]
    fn test_seat_limit() {
        let mut config = Config::default();
        assert_eq!(config.seat_limit(), None);

        config.run.test_mode = true;
        config.run.test_limit = 3;
        assert_eq!(config.seat_limit(), Some(3));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.crawler.timeout_secs = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.site.base_url = "not a url".into();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.run.test_mode = true;
        config.run.test_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("does/not/exist.toml");
        assert_eq!(config.site.index_url, "https://results.elections.gov.lk");
    }
}
