//! Declared-versus-extracted count reconciliation
//!
//! Listing pages annotate each city with a location count. The count is
//! advisory: the site's own numbers can be stale, so a mismatch is reported
//! and never affects what gets written.

use crate::model::DirectoryEntry;

/// A city whose extracted record count differs from its declared count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMismatch {
    pub url: String,
    pub place_name: String,
    pub declared: u32,
    pub actual: usize,
}

/// Outcome of comparing one city's counts
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    Match,
    Mismatch(CountMismatch),
}

impl Reconciliation {
    pub fn is_match(&self) -> bool {
        matches!(self, Self::Match)
    }
}

/// Compares the declared count of `entry` with the number of records extracted
///
/// Logs a warning on mismatch. Never fails.
pub fn reconcile(entry: &DirectoryEntry, actual: usize) -> Reconciliation {
    if entry.declared_count as usize == actual {
        return Reconciliation::Match;
    }

    tracing::warn!(
        "Expected {} locations but got {} for {}",
        entry.declared_count,
        actual,
        entry.url
    );

    Reconciliation::Mismatch(CountMismatch {
        url: entry.url.clone(),
        place_name: entry.place_name.clone(),
        declared: entry.declared_count,
        actual,
    })
}
