//! The bang mapping: the unit of persistence

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// An ordered mapping from bang shortcut to URL template
///
/// Entries keep their insertion order. Inserting an existing shortcut
/// replaces its URL in place, so the mapping behaves like a JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BangMapping {
    entries: IndexMap<String, String>,
}

impl BangMapping {
    /// Create a new empty mapping
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a bang, returning the previous URL if any
    pub fn insert(&mut self, shortcut: impl Into<String>, url: impl Into<String>) -> Option<String> {
        self.entries.insert(shortcut.into(), url.into())
    }

    /// Look up the URL template for a shortcut
    pub fn get(&self, shortcut: &str) -> Option<&str> {
        self.entries.get(shortcut).map(String::as_str)
    }

    /// Remove a bang, preserving the order of the remaining entries
    pub fn remove(&mut self, shortcut: &str) -> Option<String> {
        self.entries.shift_remove(shortcut)
    }

    pub fn contains(&self, shortcut: &str) -> bool {
        self.entries.contains_key(shortcut)
    }

    /// Get the number of bangs
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(shortcut, url)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Iterate over shortcuts in insertion order
    pub fn shortcuts(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Serialize to the compact JSON object used for export
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl<K, V> FromIterator<(K, V)> for BangMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        mapping.extend(iter);
        mapping
    }
}

impl<K, V> Extend<(K, V)> for BangMapping
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl IntoIterator for BangMapping {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
