//! Key/value slots that serialized view states are read from.

use std::collections::{BTreeMap, HashMap};

/// A caller-supplied key/value lookup, e.g. the query parameters of a URL.
pub trait StateSource {
    /// Raw value stored under `key`.
    fn lookup(&self, key: &str) -> Option<String>;
}

impl StateSource for HashMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

impl StateSource for BTreeMap<String, String> {
    fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// A source with no stored values.
impl StateSource for () {
    fn lookup(&self, _key: &str) -> Option<String> {
        None
    }
}

/// Parsed `application/x-www-form-urlencoded` query string.
///
/// Later duplicates of a key win. Pairs that fail to decode are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    params: BTreeMap<String, String>,
}

impl QueryString {
    /// Parse `a=1&b=2`, with or without a leading `?`.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let params = query
            .trim_start_matches('?')
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                Some((decode(key)?, decode(value)?))
            })
            .collect();
        Self { params }
    }

    /// Insert or replace a raw (already decoded) value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.params.insert(key.into(), value.into());
    }

    /// Encode back into a query string (without leading `?`).
    #[must_use]
    pub fn encode(&self) -> String {
        self.params
            .iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl StateSource for QueryString {
    fn lookup(&self, key: &str) -> Option<String> {
        self.params.get(key).cloned()
    }
}

fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(|decoded| decoded.into_owned())
}
