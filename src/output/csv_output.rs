//! CSV output writer
//!
//! Writes the aggregated crawl results as two delimited files:
//!
//! | File | Columns |
//! |------|---------|
//! | cities | `place_name, state_code, data_count, url` |
//! | locations | `name, address, city, state, zip_code, country, latitude, longitude` |

use crate::config::OutputConfig;
use crate::model::{DirectoryEntry, LocationRecord};
use crate::output::traits::{OutputError, OutputResult, TabularRecord};
use csv::Writer;
use std::fs::File;
use std::path::{Path, PathBuf};

impl TabularRecord for DirectoryEntry {
    const HEADER: &'static [&'static str] = &["place_name", "state_code", "data_count", "url"];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.place_name.clone(),
            self.state.upper(),
            self.declared_count.to_string(),
            self.url.clone(),
        ]
    }
}

impl TabularRecord for LocationRecord {
    const HEADER: &'static [&'static str] = &[
        "name",
        "address",
        "city",
        "state",
        "zip_code",
        "country",
        "latitude",
        "longitude",
    ];

    fn to_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.address.clone(),
            self.city.clone(),
            self.state.clone(),
            self.zip_code.clone(),
            self.country.clone(),
            format_coordinate(self.latitude),
            format_coordinate(self.longitude),
        ]
    }
}

/// Formats an optional coordinate as fixed 8-decimal text, or empty when absent
///
/// # Examples
///
/// ```
/// use locator_sweep::output::format_coordinate;
///
/// assert_eq!(format_coordinate(Some(42.1234)), "42.12340000");
/// assert_eq!(format_coordinate(None), "");
/// ```
pub fn format_coordinate(value: Option<f64>) -> String {
    value.map(|v| format!("{:.8}", v)).unwrap_or_default()
}

/// Paths of the files written by [`write_outputs`]
#[derive(Debug, Clone)]
pub struct OutputPaths {
    pub cities: PathBuf,
    pub locations: PathBuf,
}

/// Writes a header row and one row per record to `path`
///
/// The parent directory is created if absent. Fails only if the directory or
/// file cannot be created or written.
///
/// # Returns
///
/// The number of data rows written
pub fn write_csv<R: TabularRecord>(path: &Path, rows: &[R]) -> OutputResult<usize> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| OutputError::CreateDir {
            path: parent.display().to_string(),
            source,
        })?;
    }

    let file = File::create(path).map_err(|source| OutputError::CreateFile {
        path: path.display().to_string(),
        source,
    })?;

    let mut writer = Writer::from_writer(file);
    writer.write_record(R::HEADER)?;
    for row in rows {
        writer.write_record(row.to_row())?;
    }
    writer.flush()?;

    tracing::debug!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(rows.len())
}

/// Writes the city and location files into the configured output directory
pub fn write_outputs(
    config: &OutputConfig,
    cities: &[DirectoryEntry],
    locations: &[LocationRecord],
) -> OutputResult<OutputPaths> {
    let directory = Path::new(&config.directory);
    std::fs::create_dir_all(directory).map_err(|source| OutputError::CreateDir {
        path: directory.display().to_string(),
        source,
    })?;

    let paths = OutputPaths {
        cities: directory.join(&config.cities_file),
        locations: directory.join(&config.locations_file),
    };

    write_csv(&paths.cities, cities)?;
    write_csv(&paths.locations, locations)?;

    tracing::info!(
        "Saved {} cities to {} and {} locations to {}",
        cities.len(),
        paths.cities.display(),
        locations.len(),
        paths.locations.display()
    );

    Ok(paths)
}
