//! Data-access interface to the host content store
//!
//! Every lookup is infallible: an empty result means "nothing to show".

use crate::domain::{PostId, PostMeta, PostTypeInfo, TaxonomyInfo};

/// Read access to posts, taxonomies and metadata
pub trait ContentStore: Send + Sync {
    /// Ids of the public taxonomies attached to a post type
    fn public_taxonomies(&self, post_type: &str) -> Vec<String>;

    /// Display information about a taxonomy
    fn taxonomy(&self, taxonomy: &str) -> Option<TaxonomyInfo>;

    /// Linked term labels of a post joined by `separator`; empty if none
    fn term_list_html(&self, post_id: PostId, taxonomy: &str, separator: &str) -> String;

    /// Every metadata key of a post with all of its raw values
    fn post_meta(&self, post_id: PostId) -> PostMeta;

    /// Display information about a post type
    fn post_type(&self, post_type: &str) -> Option<PostTypeInfo>;
}
