use std::fmt;

use crate::FilterState;

/// Parses a URL query string (with or without the leading `?`) into a filter map.
///
/// Values stay strings and unknown keys pass through. Components that cannot be
/// percent-decoded are kept as the raw substring.
pub fn decode(query: &str) -> FilterState {
    let query = query.strip_prefix('?').unwrap_or(query);
    let mut filters = FilterState::new();
    for segment in query.split('&').filter(|segment| !segment.is_empty()) {
        let (raw_key, raw_value) = segment.split_once('=').unwrap_or((segment, ""));
        let key = decode_component(raw_key);
        if key.is_empty() {
            continue;
        }
        filters.set(key, decode_component(raw_value));
    }
    filters
}

/// Serializes a filter map back into a query string, preserving key order.
pub fn encode(filters: &FilterState) -> String {
    filters
        .iter()
        .map(|(key, value)| {
            format!(
                "{}={}",
                urlencoding::encode(key),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => raw.to_string(),
    }
}

/// A router location: path plus the filter map carried in its query string.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    pub path: String,
    pub filters: FilterState,
}

impl Location {
    pub fn new(path: impl Into<String>, filters: FilterState) -> Self {
        Self {
            path: path.into(),
            filters,
        }
    }

    /// Splits `"/search?query=lamp"` into path and decoded filters. A fragment is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let raw = raw.split_once('#').map_or(raw, |(before, _)| before);
        let (path, query) = raw.split_once('?').unwrap_or((raw, ""));
        let path = if path.is_empty() { "/" } else { path };
        Self::new(path, decode(query))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.filters.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, encode(&self.filters))
        }
    }
}
