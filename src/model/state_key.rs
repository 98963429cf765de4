//! State keys that root the crawl fan-out
//!
//! The key space is static: the 48 continental US states. Alaska and Hawaii
//! are not part of the directory being crawled.

use crate::ConfigError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// All 48 continental state codes, in the order the crawl schedules them
pub const ALL_STATE_CODES: [&str; 48] = [
    "al", "az", "ar", "ca", "co", "ct", "de", "fl", "ga", "id", "il", "in", "ia", "ks", "ky",
    "la", "me", "md", "ma", "mi", "mn", "ms", "mo", "mt", "ne", "nv", "nh", "nj", "nm", "ny",
    "nc", "nd", "oh", "ok", "or", "pa", "ri", "sc", "sd", "tn", "tx", "ut", "vt", "va", "wa",
    "wv", "wi", "wy",
];

/// A two-letter state code known to the crawl
///
/// Always lowercase internally; use [`StateKey::upper`] for display columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StateKey(&'static str);

impl<'de> Deserialize<'de> for StateKey {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Self::try_from(value).map_err(serde::de::Error::custom)
    }
}

impl StateKey {
    /// Returns every state key in scheduling order
    pub fn all() -> Vec<Self> {
        ALL_STATE_CODES.iter().map(|code| Self(*code)).collect()
    }

    /// The lowercase code used in listing URLs
    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// The uppercase code used in output and progress lines
    pub fn upper(&self) -> String {
        self.0.to_ascii_uppercase()
    }
}

impl FromStr for StateKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ALL_STATE_CODES
            .iter()
            .find(|code| **code == wanted)
            .map(|code| Self(*code))
            .ok_or_else(|| ConfigError::UnknownState(s.to_string()))
    }
}

impl TryFrom<String> for StateKey {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}
