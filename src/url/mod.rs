//! URL handling module for Locator-Sweep
//!
//! The site's URL scheme is simple: a fixed origin, state listings at
//! `origin/{state}`, and city/location paths discovered as relative hrefs in
//! listing markup. Paths are joined onto the origin verbatim; no normalization
//! is applied, so trailing or doubled slashes are whatever the markup says.

use crate::model::StateKey;
use crate::ConfigError;
use url::Url;

/// Validates a configured origin and returns it parsed
///
/// The origin must be an absolute http(s) URL with a host and no query or
/// fragment.
///
/// # Examples
///
/// ```
/// use locator_sweep::url::validate_origin;
///
/// assert!(validate_origin("https://locations.example.com").is_ok());
/// assert!(validate_origin("ftp://locations.example.com").is_err());
/// ```
pub fn validate_origin(origin: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(origin)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid origin '{}': {}", origin, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' must use http or https",
            origin
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' has no host",
            origin
        )));
    }

    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::InvalidUrl(format!(
            "Origin '{}' must not carry a query or fragment",
            origin
        )));
    }

    Ok(url)
}

/// Joins a relative path found in listing markup onto the origin
///
/// Exactly one `/` separates the origin from the path; the path itself is
/// appended as-is.
pub fn join_origin(origin: &str, path: &str) -> String {
    format!("{}/{}", origin.trim_end_matches('/'), path)
}

/// Builds the listing URL for a state: `origin/{state}`
pub fn state_url(origin: &str, state: StateKey) -> String {
    join_origin(origin, state.as_str())
}
