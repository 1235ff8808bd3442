use std::str::FromStr;

/// Filter keys understood by the listing views. Any other key is carried
/// through untouched.
pub mod keys {
    pub const QUERY: &str = "query";
    pub const CATEGORY_ID: &str = "category_id";
    pub const LISTING_TYPE: &str = "listing_type";
    pub const MIN_PRICE: &str = "min_price";
    pub const MAX_PRICE: &str = "max_price";
    pub const SORT: &str = "sort";
    pub const ORDER: &str = "order";
    pub const NAV: &str = "nav";
    pub const PAGE: &str = "page";
    pub const START: &str = "start";
    pub const RANGE: &str = "range";
}

/// Ordered string map mirroring a URL query string.
///
/// A key that is not present is unset; there is no separate "empty" state.
/// Equality ignores key order.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    entries: Vec<(String, String)>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a state from pairs whose value may be missing; `None` values are dropped.
    pub fn from_optional_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, Option<V>)>,
    {
        pairs
            .into_iter()
            .filter_map(|(key, value)| value.map(|value| (key, value)))
            .collect()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Parses the value under `key`; unparseable values read as unset.
    pub fn number<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|raw| raw.trim().parse().ok())
    }

    /// Sets `key`, keeping its original position when it already exists.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PartialEq for FilterState {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(k, v)| other.get(k) == Some(v))
    }
}

impl Eq for FilterState {}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FilterState {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut state = FilterState::new();
        for (key, value) in iter {
            state.set(key, value);
        }
        state
    }
}
