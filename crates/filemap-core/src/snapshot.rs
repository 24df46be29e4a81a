//! Immutable key/value tables built from the backing file.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A point-in-time mapping loaded from the backing file.
///
/// Built once by the loader and then only read. A reload produces a new
/// snapshot that replaces this one wholesale; dropping it releases every key
/// and value together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: BTreeMap<String, String>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a pair unless `key` is already present.
    ///
    /// Returns `false` and discards the pair when the key exists, so the first
    /// occurrence in a file wins.
    pub(crate) fn insert_first(&mut self, key: &str, value: &str) -> bool {
        match self.entries.entry(key.to_owned()) {
            Entry::Vacant(slot) => {
                slot.insert(value.to_owned());
                true
            }
            Entry::Occupied(_) => false,
        }
    }

    /// Look up the value stored for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Whether `key` has an entry.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
