//! Sort strategies for the merged dataset
//!
//! The host historically named its sort functions (`ksort`, `krsort`, ...)
//! and extensions returned those names from the sorter hook. Names are still
//! accepted, but a strategy is a value: a third party can hand back any
//! comparator through [`Sorter::custom`].

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use super::Dataset;

/// Comparator over `(label, value)` pairs
pub type CompareFn = dyn Fn((&str, &str), (&str, &str)) -> Ordering + Send + Sync;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SorterError {
    #[error("Unknown sorter: {0}. Valid values: ksort, krsort, asort, arsort, none")]
    Unknown(String),
}

/// Strategy used to order the dataset before it is rendered
#[derive(Clone, Default)]
pub enum Sorter {
    /// Ascending by label, case-sensitive ordinal (`ksort`)
    #[default]
    ByLabel,
    /// Descending by label (`krsort`)
    ByLabelDescending,
    /// Ascending by value (`asort`)
    ByValue,
    /// Descending by value (`arsort`)
    ByValueDescending,
    /// Keep collection order (`none`)
    Unsorted,
    /// Caller-provided comparator
    Custom { name: String, compare: Arc<CompareFn> },
}

impl Sorter {
    /// Wraps a comparator as a sorter
    pub fn custom<F>(name: impl Into<String>, compare: F) -> Self
    where
        F: Fn((&str, &str), (&str, &str)) -> Ordering + Send + Sync + 'static,
    {
        Sorter::Custom {
            name: name.into(),
            compare: Arc::new(compare),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Sorter::ByLabel => "ksort",
            Sorter::ByLabelDescending => "krsort",
            Sorter::ByValue => "asort",
            Sorter::ByValueDescending => "arsort",
            Sorter::Unsorted => "none",
            Sorter::Custom { name, .. } => name,
        }
    }

    /// Reorders the dataset in place. Every strategy is stable.
    pub fn apply(&self, dataset: &mut Dataset) {
        match self {
            Sorter::ByLabel => dataset.sort_by(|a, b| a.0.cmp(b.0)),
            Sorter::ByLabelDescending => dataset.sort_by(|a, b| b.0.cmp(a.0)),
            Sorter::ByValue => dataset.sort_by(|a, b| a.1.cmp(b.1)),
            Sorter::ByValueDescending => dataset.sort_by(|a, b| b.1.cmp(a.1)),
            Sorter::Unsorted => {}
            Sorter::Custom { compare, .. } => dataset.sort_by(|a, b| compare(a, b)),
        }
    }
}

impl FromStr for Sorter {
    type Err = SorterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ksort" => Ok(Sorter::ByLabel),
            "krsort" => Ok(Sorter::ByLabelDescending),
            "asort" => Ok(Sorter::ByValue),
            "arsort" => Ok(Sorter::ByValueDescending),
            "none" => Ok(Sorter::Unsorted),
            other => Err(SorterError::Unknown(other.to_string())),
        }
    }
}

impl fmt::Debug for Sorter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sorter::Custom { name, .. } => f.debug_struct("Custom").field("name", name).finish(),
            other => f.write_str(other.name()),
        }
    }
}

impl PartialEq for Sorter {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Sorter::Custom { compare: a, .. }, Sorter::Custom { compare: b, .. }) => {
                Arc::ptr_eq(a, b)
            }
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}
