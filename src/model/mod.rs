//! Data model for the crawl
//!
//! - `StateKey`: one of the 48 continental state codes that root the fan-out
//! - `DirectoryEntry`: a child link discovered on a listing page, with its declared count
//! - `LocationRecord`: a store location extracted from a city page

mod records;
mod state_key;

pub use records::{DirectoryEntry, LocationRecord};
pub use state_key::{StateKey, ALL_STATE_CODES};
