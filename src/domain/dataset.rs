//! Label/value rows and the ordered dataset they are merged into

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// One displayable row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelValueEntry {
    pub label: String,
    pub value: String,
}

impl LabelValueEntry {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A raw metadata value as held by the store
///
/// Most values are plain strings; array-valued metadata arrives as a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetaValue {
    Text(String),
    List(Vec<String>),
}

impl MetaValue {
    pub fn is_empty(&self) -> bool {
        match self {
            MetaValue::Text(s) => s.is_empty(),
            MetaValue::List(items) => items.is_empty(),
        }
    }

    /// Flattens the value into display text, joining lists with `, `
    pub fn to_display(&self) -> String {
        match self {
            MetaValue::Text(s) => s.clone(),
            MetaValue::List(items) => items.join(", "),
        }
    }
}

impl Default for MetaValue {
    fn default() -> Self {
        MetaValue::Text(String::new())
    }
}

impl From<&str> for MetaValue {
    fn from(s: &str) -> Self {
        MetaValue::Text(s.to_string())
    }
}

impl From<String> for MetaValue {
    fn from(s: String) -> Self {
        MetaValue::Text(s)
    }
}

impl From<Vec<String>> for MetaValue {
    fn from(items: Vec<String>) -> Self {
        MetaValue::List(items)
    }
}

/// All metadata of a post: key to every stored value, in store order
pub type PostMeta = IndexMap<String, Vec<MetaValue>>;

/// Ordered label to value mapping built fresh for each render
///
/// Inserting an existing label overwrites its value in place (the label
/// keeps its original position), so merging metadata after taxonomies
/// lets metadata win on collision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dataset {
    rows: IndexMap<String, String>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a row; returns the value it replaced, if any
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.rows.insert(label.into(), value.into())
    }

    /// Merges entries in order, later labels overwriting earlier ones
    pub fn extend_entries<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = LabelValueEntry>,
    {
        for entry in entries {
            self.insert(entry.label, entry.value);
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.rows.get(label).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.rows.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn entries(&self) -> Vec<LabelValueEntry> {
        self.iter()
            .map(|(label, value)| LabelValueEntry::new(label, value))
            .collect()
    }

    /// Drops rows whose label or value is empty
    pub fn retain_displayable(&mut self) {
        self.rows
            .retain(|label, value| !label.is_empty() && !value.is_empty());
    }

    /// Stable sort of the rows with a comparator over `(label, value)` pairs
    pub fn sort_by<F>(&mut self, mut compare: F)
    where
        F: FnMut((&str, &str), (&str, &str)) -> std::cmp::Ordering,
    {
        self.rows
            .sort_by(|k1, v1, k2, v2| compare((k1.as_str(), v1.as_str()), (k2.as_str(), v2.as_str())));
    }
}

impl FromIterator<LabelValueEntry> for Dataset {
    fn from_iter<T: IntoIterator<Item = LabelValueEntry>>(iter: T) -> Self {
        let mut dataset = Dataset::new();
        dataset.extend_entries(iter);
        dataset
    }
}

impl<L: Into<String>, V: Into<String>> FromIterator<(L, V)> for Dataset {
    fn from_iter<T: IntoIterator<Item = (L, V)>>(iter: T) -> Self {
        let mut dataset = Dataset::new();
        for (label, value) in iter {
            dataset.insert(label, value);
        }
        dataset
    }
}
