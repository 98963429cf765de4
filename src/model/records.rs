//! Records produced by the walker and the extractor

use crate::model::StateKey;

/// A child link discovered on a directory listing page
///
/// Used for both city rows (on a state page) and location rows. The URL is
/// always absolute; `declared_count` is advisory and defaults to 0 when the
/// listing's count annotation is missing or unparsable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    /// Absolute URL of the child page
    pub url: String,

    /// Record count declared by the parent listing
    pub declared_count: u32,

    /// Display name (may be empty)
    pub place_name: String,

    /// State the entry was discovered under
    pub state: StateKey,
}

/// A single store location
///
/// Only emitted when a street address was resolved. Latitude and longitude are
/// `Some` only when the page carried machine-readable geo metadata.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocationRecord {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl LocationRecord {
    /// Returns true if both coordinates are known
    pub fn has_coordinates(&self) -> bool {
        self.latitude.is_some() && self.longitude.is_some()
    }
}
