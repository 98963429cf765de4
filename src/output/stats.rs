//! Run statistics and the final console summary

use chrono::{DateTime, Utc};
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone)]
pub struct CrawlStatistics {
    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// Wall-clock duration of the crawl (excluding output writing)
    pub elapsed: Duration,

    /// Number of state listings attempted
    pub states_attempted: usize,

    /// Number of state listings that could not be walked
    pub states_failed: usize,

    /// Number of city entries discovered across all states
    pub cities_discovered: usize,

    /// Number of city pages that could not be extracted
    pub cities_failed: usize,

    /// Number of location records extracted
    pub locations_extracted: usize,

    /// Number of location records carrying both coordinates
    pub locations_with_coordinates: usize,

    /// Number of cities whose declared count differed from the extracted count
    pub count_mismatches: usize,
}

impl CrawlStatistics {
    /// Returns the share of attempted cities that were extracted, as a percentage
    pub fn city_success_rate(&self) -> f64 {
        if self.cities_discovered == 0 {
            return 0.0;
        }
        let succeeded = self.cities_discovered.saturating_sub(self.cities_failed);
        (succeeded as f64 / self.cities_discovered as f64) * 100.0
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics) {
    let rule = "=".repeat(80);

    println!("\n{}", rule);
    println!(
        "SUMMARY: Found {} total cities and {} total locations across {} states",
        stats.cities_discovered, stats.locations_extracted, stats.states_attempted
    );
    println!("{}", rule);

    println!("  Started: {}", stats.started_at.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
    println!("  States failed: {}", stats.states_failed);
    println!(
        "  Cities failed: {} ({:.1}% extracted)",
        stats.cities_failed,
        stats.city_success_rate()
    );
    println!(
        "  Locations with coordinates: {}",
        stats.locations_with_coordinates
    );
    println!("  Count mismatches: {}", stats.count_mismatches);
}
