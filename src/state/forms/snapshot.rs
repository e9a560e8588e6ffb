//! Materialized answers of a submitted form

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A snapshot value: a name seen once stays a string, a repeated name
/// becomes an ordered sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SnapshotValue {
    Single(String),
    Multiple(Vec<String>),
}

impl SnapshotValue {
    fn push(&mut self, value: String) {
        match self {
            SnapshotValue::Single(first) => {
                let first = std::mem::take(first);
                *self = SnapshotValue::Multiple(vec![first, value]);
            }
            SnapshotValue::Multiple(values) => values.push(value),
        }
    }
}

impl From<&str> for SnapshotValue {
    fn from(value: &str) -> Self {
        SnapshotValue::Single(value.to_string())
    }
}

/// Ordered `name -> value(s)` mapping; keys keep first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSnapshot {
    entries: Vec<(String, SnapshotValue)>,
}

impl FormSnapshot {
    /// Fold `(name, value)` pairs, accumulating repeated names
    pub fn from_entries<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut snapshot = Self::default();
        for (key, value) in pairs {
            snapshot.append(key, value);
        }
        snapshot
    }

    pub fn append(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, existing)) => existing.push(value.to_string()),
            None => self
                .entries
                .push((key.to_string(), SnapshotValue::Single(value.to_string()))),
        }
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&SnapshotValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for FormSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
