use crate::model::StateKey;
use serde::Deserialize;

/// Main configuration structure for Locator-Sweep
///
/// Every section is optional; an empty file yields the reference crawl.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Target site configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin that state codes and discovered relative paths are joined onto
    pub origin: String,

    /// Brand label, reported in the dry run
    pub brand: String,

    /// State keys to crawl
    pub states: Vec<StateKey>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "https://locations.kfc.com".to_string(),
            brand: "KFC".to_string(),
            states: StateKey::all(),
        }
    }
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of requests in flight across all state tasks
    #[serde(rename = "max-concurrent-requests")]
    pub max_concurrent_requests: u32,

    /// Fixed delay between sequential requests made by one task (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,

    /// Only visit the first N cities of each state listing
    #[serde(rename = "max-cities-per-state")]
    pub max_cities_per_state: Option<usize>,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 48,
            request_delay_ms: 0,
            request_timeout_secs: 30,
            max_cities_per_state: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: Option<String>,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "LocatorSweep".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: None,
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version (+ContactURL)`
    pub fn header_value(&self) -> String {
        match &self.contact_url {
            Some(url) => format!("{}/{} (+{})", self.crawler_name, self.crawler_version, url),
            None => format!("{}/{}", self.crawler_name, self.crawler_version),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the CSV files are written into (created if absent)
    pub directory: String,

    /// File name of the city listing CSV
    #[serde(rename = "cities-file")]
    pub cities_file: String,

    /// File name of the location CSV
    #[serde(rename = "locations-file")]
    pub locations_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: "out".to_string(),
            cities_file: "cities.csv".to_string(),
            locations_file: "locations.csv".to_string(),
        }
    }
}
