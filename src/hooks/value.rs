//! Values passed along filter chains
//!
//! Every hook seeds its chain with a [`HookValue`] and hands callbacks
//! further `HookValue`s as extra arguments. Typed extraction happens once
//! the chain has run, via the `into_*` helpers, which accept the loose
//! shapes extensions have always returned (a plain string where a key is
//! expected, `false` to mean "nothing").

use serde::Serialize;

use super::HookError;
use crate::domain::{Dataset, MetaValue, PostMeta, PostTypeInfo, RenderContext, Sorter};
use crate::storage::AssetQueue;

/// Outcome of the metadata key chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyDecision {
    /// Render the row under this label
    Keep(String),
    /// Suppress the row
    Drop,
}

impl KeyDecision {
    pub fn as_label(&self) -> Option<&str> {
        match self {
            KeyDecision::Keep(label) if !label.is_empty() => Some(label),
            _ => None,
        }
    }

    /// Applies `f` to a kept label; `Drop` passes through
    pub fn map<F: FnOnce(&str) -> String>(self, f: F) -> Self {
        match self {
            KeyDecision::Keep(label) => KeyDecision::Keep(f(&label)),
            KeyDecision::Drop => KeyDecision::Drop,
        }
    }
}

/// A value carried through a hook
#[derive(Debug, Clone, Default)]
pub enum HookValue {
    /// Padding for arguments the caller did not supply
    #[default]
    Null,
    Bool(bool),
    Text(String),
    Key(KeyDecision),
    Meta(MetaValue),
    Taxonomies(Vec<String>),
    PostMeta(PostMeta),
    Dataset(Dataset),
    Sorter(Sorter),
    Context(RenderContext),
    PostType(PostTypeInfo),
    Assets(AssetQueue),
}

impl HookValue {
    /// Name of the variant, used in error messages and listings
    pub fn kind(&self) -> &'static str {
        match self {
            HookValue::Null => "null",
            HookValue::Bool(_) => "bool",
            HookValue::Text(_) => "text",
            HookValue::Key(_) => "key",
            HookValue::Meta(_) => "meta",
            HookValue::Taxonomies(_) => "taxonomies",
            HookValue::PostMeta(_) => "postmeta",
            HookValue::Dataset(_) => "dataset",
            HookValue::Sorter(_) => "sorter",
            HookValue::Context(_) => "context",
            HookValue::PostType(_) => "post_type",
            HookValue::Assets(_) => "assets",
        }
    }

    /// Loose truthiness: null, false, empty strings and empty collections
    /// are falsy. `"0"` is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            HookValue::Null => false,
            HookValue::Bool(b) => *b,
            HookValue::Text(s) => !s.is_empty(),
            HookValue::Key(key) => key.as_label().is_some(),
            HookValue::Meta(value) => !value.is_empty(),
            HookValue::Taxonomies(list) => !list.is_empty(),
            HookValue::PostMeta(meta) => !meta.is_empty(),
            HookValue::Dataset(dataset) => !dataset.is_empty(),
            HookValue::Sorter(_)
            | HookValue::Context(_)
            | HookValue::PostType(_)
            | HookValue::Assets(_) => true,
        }
    }

    pub fn as_context(&self) -> Option<&RenderContext> {
        match self {
            HookValue::Context(ctx) => Some(ctx),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            HookValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn into_key(self, hook: &str) -> Result<KeyDecision, HookError> {
        match self {
            HookValue::Key(key) => Ok(key),
            HookValue::Text(s) if !s.is_empty() => Ok(KeyDecision::Keep(s)),
            other if !other.is_truthy() => Ok(KeyDecision::Drop),
            other => Err(unexpected(hook, "key", &other)),
        }
    }

    pub fn into_meta(self, hook: &str) -> Result<MetaValue, HookError> {
        match self {
            HookValue::Meta(value) => Ok(value),
            HookValue::Text(s) => Ok(MetaValue::Text(s)),
            other if !other.is_truthy() => Ok(MetaValue::default()),
            other => Err(unexpected(hook, "meta", &other)),
        }
    }

    pub fn into_taxonomies(self, hook: &str) -> Result<Vec<String>, HookError> {
        match self {
            HookValue::Taxonomies(list) => Ok(list),
            other if !other.is_truthy() => Ok(Vec::new()),
            other => Err(unexpected(hook, "taxonomies", &other)),
        }
    }

    pub fn into_postmeta(self, hook: &str) -> Result<PostMeta, HookError> {
        match self {
            HookValue::PostMeta(meta) => Ok(meta),
            other if !other.is_truthy() => Ok(PostMeta::new()),
            other => Err(unexpected(hook, "postmeta", &other)),
        }
    }

    pub fn into_dataset(self, hook: &str) -> Result<Dataset, HookError> {
        match self {
            HookValue::Dataset(dataset) => Ok(dataset),
            other if !other.is_truthy() => Ok(Dataset::new()),
            other => Err(unexpected(hook, "dataset", &other)),
        }
    }

    pub fn into_sorter(self, hook: &str) -> Result<Sorter, HookError> {
        match self {
            HookValue::Sorter(sorter) => Ok(sorter),
            HookValue::Text(name) => name.parse().map_err(|_| HookError::UnexpectedValue {
                hook: hook.to_string(),
                expected: "sorter",
                found: format!("unknown sorter name '{}'", name),
            }),
            other => Err(unexpected(hook, "sorter", &other)),
        }
    }

    pub fn into_text(self, hook: &str) -> Result<String, HookError> {
        match self {
            HookValue::Text(s) => Ok(s),
            other if !other.is_truthy() => Ok(String::new()),
            other => Err(unexpected(hook, "text", &other)),
        }
    }
}

fn unexpected(hook: &str, expected: &'static str, found: &HookValue) -> HookError {
    HookError::UnexpectedValue {
        hook: hook.to_string(),
        expected,
        found: found.kind().to_string(),
    }
}

impl From<bool> for HookValue {
    fn from(b: bool) -> Self {
        HookValue::Bool(b)
    }
}

impl From<&str> for HookValue {
    fn from(s: &str) -> Self {
        HookValue::Text(s.to_string())
    }
}

impl From<String> for HookValue {
    fn from(s: String) -> Self {
        HookValue::Text(s)
    }
}

impl From<KeyDecision> for HookValue {
    fn from(key: KeyDecision) -> Self {
        HookValue::Key(key)
    }
}

impl From<MetaValue> for HookValue {
    fn from(value: MetaValue) -> Self {
        HookValue::Meta(value)
    }
}

impl From<Dataset> for HookValue {
    fn from(dataset: Dataset) -> Self {
        HookValue::Dataset(dataset)
    }
}

impl From<Sorter> for HookValue {
    fn from(sorter: Sorter) -> Self {
        HookValue::Sorter(sorter)
    }
}

impl From<RenderContext> for HookValue {
    fn from(ctx: RenderContext) -> Self {
        HookValue::Context(ctx)
    }
}
