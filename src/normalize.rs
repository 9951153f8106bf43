//! # Normalisation Helpers
//!
//! Location canonicalisation, tag conversion between the flat configuration map
//! and the Resource Manager representation, and timestamp formatting.

use chrono::{DateTime, NaiveDateTime, SecondsFormat};
use std::collections::HashMap;

/// Canonicalise a free-text Azure location (`"West US"` -> `"westus"`)
pub fn normalize_location(location: &str) -> String {
    location
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Convert configured tags into the Resource Manager tag representation
pub fn expand_tags(tags: &HashMap<String, String>) -> HashMap<String, Option<String>> {
    tags.iter()
        .map(|(key, value)| (key.clone(), Some(value.clone())))
        .collect()
}

/// Flatten Resource Manager tags into the configuration representation
///
/// Every key is kept; a null value becomes an empty string.
pub fn flatten_tags(tags: Option<&HashMap<String, Option<String>>>) -> HashMap<String, String> {
    tags.map(|tags| {
        tags.iter()
            .map(|(key, value)| (key.clone(), value.clone().unwrap_or_default()))
            .collect()
    })
    .unwrap_or_default()
}

/// Format a Resource Manager timestamp as RFC 3339 with second precision
///
/// Offsets are preserved (`Z` for UTC). Timestamps without an offset are taken as UTC.
pub fn normalize_timestamp(raw: &str) -> Result<String, chrono::ParseError> {
    let trimmed = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(trimmed).or_else(|rfc3339_error| {
        NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc().fixed_offset())
            .map_err(|_naive_error| rfc3339_error)
    })?;
    Ok(parsed.to_rfc3339_opts(SecondsFormat::Secs, true))
}
