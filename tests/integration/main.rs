//! Integration tests for Locator-Sweep
//!
//! These tests use wiremock to stand in for the store-locator site.

mod crawl_tests;
mod log_capture;
