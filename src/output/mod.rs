//! Output module for crawl results and reporting
//!
//! This module handles:
//! - Writing cities and locations as CSV files
//! - Reconciling declared counts against extracted counts
//! - Recording crawl statistics and printing the final summary
//! - Console progress lines

mod csv_output;
mod progress;
mod reconcile;
pub mod stats;
mod traits;

pub use csv_output::{format_coordinate, write_csv, write_outputs, OutputPaths};
pub use progress::Progress;
pub use reconcile::{reconcile, CountMismatch, Reconciliation};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, TabularRecord};
