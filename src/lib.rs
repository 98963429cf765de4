//! Locator-Sweep: a store-locator directory crawler
//!
//! This crate walks a three-level store-locator site (state → city → location),
//! extracts address and geocoordinate records from each city page, and writes
//! the aggregated results as CSV.

pub mod config;
pub mod crawler;
pub mod model;
pub mod output;
pub mod url;

#[cfg(test)]
mod testing;

use thiserror::Error;

/// Main error type for Locator-Sweep operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Status code error for {url}: {status}")]
    Status { url: String, status: u16 },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("HTML parse error for {url}: {message}")]
    HtmlParse { url: String, message: String },

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),
}

impl CrawlError {
    /// Returns true if this error should stop the whole run.
    ///
    /// Configuration errors and failures to persist results are fatal.
    /// Transport, status and parse errors are skipped at whatever level
    /// raised them.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Output(_) | Self::Config(_))
    }
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown state code: '{0}'")]
    UnknownState(String),
}

/// Result type alias for Locator-Sweep operations
pub type Result<T> = std::result::Result<T, CrawlError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{run_crawl, CrawlOutcome};
pub use model::{DirectoryEntry, LocationRecord, StateKey};
