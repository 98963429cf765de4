//! Crawler module for the store-locator directory
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching and error classification
//! - Directory walking of listing pages
//! - Multi-format location extraction
//! - Request pacing and concurrency limits
//! - Overall crawl coordination and result aggregation

mod collector;
mod coordinator;
mod extractor;
mod fetcher;
mod scheduler;
mod walker;

pub use collector::Collector;
pub use coordinator::{run_crawl, Coordinator, CrawlFailure, CrawlOutcome, FailureLevel};
pub use extractor::{DetailFormat, Extraction, ExtractionStrategy, Extractor, TeaserFormat};
pub use fetcher::{build_http_client, fetch_page, fetch_url, FetchResult};
pub use scheduler::{Pacer, RequestPermit, Scheduler};
pub use walker::{parse_count, parse_directory, walk};
