//! Canonical registry: the keys a run must produce rows for

use std::collections::BTreeMap;

use seed_blocks::RowKey;

/// What a canonical key is looked up as, and how its row is labelled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalEntry {
    /// Title handed to lookup providers and the synthetic fallback.
    pub title: String,
    /// Human readable comment written next to the row.
    pub label: String,
}

impl CanonicalEntry {
    /// Entry whose label is derived from the title.
    pub fn from_title(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            label: title_to_label(&title),
            title,
        }
    }
}

/// Turns a page-style title (`Marine_Drive,_Mumbai`) into a label.
pub fn title_to_label(title: &str) -> String {
    title.replace('_', " ")
}

/// Ordered `key -> entry` mapping. Iteration is always ascending by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanonicalRegistry {
    entries: BTreeMap<RowKey, CanonicalEntry>,
}

impl CanonicalRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from `(key, title)` pairs.
    pub fn from_titles<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = (RowKey, S)>,
        S: Into<String>,
    {
        Self {
            entries: titles
                .into_iter()
                .map(|(key, title)| (key, CanonicalEntry::from_title(title)))
                .collect(),
        }
    }

    pub fn insert(&mut self, key: RowKey, entry: CanonicalEntry) {
        self.entries.insert(key, entry);
    }

    pub fn get(&self, key: RowKey) -> Option<&CanonicalEntry> {
        self.entries.get(&key)
    }

    /// Replaces labels for keys present in `labels`; other labels are kept.
    pub fn relabel(&mut self, labels: &BTreeMap<RowKey, String>) {
        for (key, entry) in &mut self.entries {
            if let Some(label) = labels.get(key) {
                entry.label = label.clone();
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (RowKey, &CanonicalEntry)> {
        self.entries.iter().map(|(key, entry)| (*key, entry))
    }

    pub fn keys(&self) -> impl Iterator<Item = RowKey> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
