//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the shared HTTP client with a proper user agent string
//! - GET requests to fetch page content
//! - Error classification (status, timeout, network)

use crate::config::Config;
use crate::CrawlError;
use reqwest::Client;
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// The server answered with a non-2xx status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// The request did not complete within the configured timeout
    Timeout,

    /// Network error (connection refused, DNS failure, body read error)
    NetworkError {
        /// The underlying client error
        error: reqwest::Error,
    },
}

impl FetchResult {
    /// Returns true if the page body was retrieved
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Where a successful fetch of `requested` actually landed, if elsewhere
    pub fn redirect_target(&self, requested: &str) -> Option<&str> {
        match self {
            Self::Success { final_url, .. } if final_url != requested => Some(final_url),
            _ => None,
        }
    }

    /// Converts the result into the page body, or the error it represents
    ///
    /// # Arguments
    ///
    /// * `url` - The requested URL, used to label the error
    pub fn into_body(self, url: &str) -> Result<String, CrawlError> {
        if let Some(target) = self.redirect_target(url) {
            tracing::debug!("{} redirected to {}", url, target);
        }

        match self {
            Self::Success { body, .. } => Ok(body),
            Self::HttpError { status_code } => Err(CrawlError::Status {
                url: url.to_string(),
                status: status_code,
            }),
            Self::Timeout => Err(CrawlError::Timeout {
                url: url.to_string(),
            }),
            Self::NetworkError { error } => Err(CrawlError::Http {
                url: url.to_string(),
                source: error,
            }),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client is shared by every state task; `reqwest::Client` is internally
/// reference counted, so cloning it is cheap.
///
/// # Example
///
/// ```no_run
/// use locator_sweep::config::Config;
/// use locator_sweep::crawler::build_http_client;
///
/// let client = build_http_client(&Config::default()).unwrap();
/// ```
pub fn build_http_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.header_value())
        .timeout(Duration::from_secs(config.crawler.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the outcome
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | `Success` |
/// | Any other status | `HttpError` |
/// | Timeout | `Timeout` |
/// | Connection/body failure | `NetworkError` |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) if e.is_timeout() => return FetchResult::Timeout,
        Err(e) => return FetchResult::NetworkError { error: e },
    };

    let status = response.status();
    if !status.is_success() {
        tracing::debug!("GET {} -> {}", url, status);
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) if e.is_timeout() => FetchResult::Timeout,
        Err(e) => FetchResult::NetworkError { error: e },
    }
}

/// Fetches a page and returns its body, failing on anything but a 2xx response
pub async fn fetch_page(client: &Client, url: &str) -> Result<String, CrawlError> {
    fetch_url(client, url).await.into_body(url)
}
