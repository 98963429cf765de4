//! Console progress lines
//!
//! Human-facing output only; machine-readable results go to the CSV files.

use crate::model::StateKey;
use colored::Colorize;

/// Prints per-state and per-city progress, or nothing when disabled
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    enabled: bool,
}

impl Progress {
    /// Progress printed to stdout
    pub fn console() -> Self {
        Self { enabled: true }
    }

    /// No progress output
    pub fn silent() -> Self {
        Self { enabled: false }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn state_started(&self, state: StateKey) {
        if self.enabled {
            println!("Fetching cities for {}...", state.upper());
        }
    }

    pub fn state_walked(&self, state: StateKey, cities: usize) {
        if self.enabled {
            println!(
                "{}",
                format!("✓ Found {} cities in {}", cities, state.upper()).green()
            );
        }
    }

    pub fn state_failed(&self, state: StateKey) {
        if self.enabled {
            println!(
                "{}",
                format!("✗ Failed to get cities for {}", state.upper()).red()
            );
        }
    }

    pub fn city_started(&self, state: StateKey, place_name: &str) {
        if self.enabled {
            println!(
                "  [{}] Fetching locations from {}...",
                state.upper(),
                place_name
            );
        }
    }

    pub fn city_extracted(&self, actual: usize, declared: u32) {
        if self.enabled {
            println!(
                "{}",
                format!("    ✓ Successfully got {}/{} locations", actual, declared).green()
            );
        }
    }

    pub fn city_failed(&self) {
        if self.enabled {
            println!("{}", "    ✗ Failed to get locations".red());
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::console()
    }
}
