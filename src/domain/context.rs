//! Render context and the host-provided descriptors of post types and
//! taxonomies.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a post in the host store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for PostId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Snapshot of the post being rendered
///
/// Passed unchanged through the whole pipeline for one render. The raw
/// content is what the store holds; the content handed to
/// [`Renderer::render`](crate::render::Renderer::render) may already have
/// been transformed by earlier host filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderContext {
    pub post_id: PostId,
    pub post_type: String,
    #[serde(default)]
    pub raw_content: String,
}

impl RenderContext {
    pub fn new(post_id: PostId, post_type: impl Into<String>) -> Self {
        Self {
            post_id,
            post_type: post_type.into(),
            raw_content: String::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.raw_content = content.into();
        self
    }
}

/// Display information about a post type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTypeInfo {
    pub name: String,
    pub singular_label: String,
}

/// Display information about a taxonomy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyInfo {
    pub name: String,
    pub singular_label: String,
}
