//! File-backed site description
//!
//! A site file lists post types, taxonomies and posts with their terms and
//! metadata. It is read once into memory and serves every lookup of
//! [`ContentStore`]. JSON and YAML are both accepted, chosen by extension.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::store::ContentStore;
use crate::domain::{MetaValue, PostId, PostMeta, PostTypeInfo, RenderContext, TaxonomyInfo};

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Unsupported site file format: {0} (expected .json, .yaml or .yml)")]
    UnknownFormat(String),

    #[error("Post not found: {0}")]
    PostNotFound(PostId),
}

/// A registered post type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostTypeRecord {
    pub singular_label: String,
}

/// A registered taxonomy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyRecord {
    pub singular_label: String,

    #[serde(default = "default_true")]
    pub public: bool,

    /// Post types the taxonomy is attached to
    #[serde(default)]
    pub object_types: Vec<String>,

    /// Prefix of term archive links; defaults to `/{taxonomy}`
    #[serde(default)]
    pub base_url: Option<String>,
}

fn default_true() -> bool {
    true
}

/// A term assigned to a post
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermRecord {
    pub name: String,
    pub slug: String,
}

/// A post with its terms and metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostRecord {
    pub id: PostId,

    pub post_type: String,

    #[serde(default)]
    pub content: String,

    /// Taxonomy id to assigned terms
    #[serde(default)]
    pub terms: IndexMap<String, Vec<TermRecord>>,

    /// Metadata key to every stored value
    #[serde(default)]
    pub meta: PostMeta,
}

impl PostRecord {
    pub fn new(id: u64, post_type: impl Into<String>) -> Self {
        Self {
            id: PostId(id),
            post_type: post_type.into(),
            content: String::new(),
            terms: IndexMap::new(),
            meta: PostMeta::new(),
        }
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_term(mut self, taxonomy: &str, name: &str, slug: &str) -> Self {
        self.terms
            .entry(taxonomy.to_string())
            .or_default()
            .push(TermRecord {
                name: name.to_string(),
                slug: slug.to_string(),
            });
        self
    }

    pub fn with_meta(mut self, key: &str, value: impl Into<MetaValue>) -> Self {
        self.meta.entry(key.to_string()).or_default().push(value.into());
        self
    }

    /// Render context for this post
    pub fn context(&self) -> RenderContext {
        RenderContext::new(self.id, self.post_type.clone()).with_content(self.content.clone())
    }
}

/// Whole site description
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Site {
    #[serde(default)]
    pub post_types: IndexMap<String, PostTypeRecord>,

    #[serde(default)]
    pub taxonomies: IndexMap<String, TaxonomyRecord>,

    #[serde(default)]
    pub posts: Vec<PostRecord>,
}

impl Site {
    pub fn with_post_type(mut self, name: &str, singular_label: &str) -> Self {
        self.post_types.insert(
            name.to_string(),
            PostTypeRecord {
                singular_label: singular_label.to_string(),
            },
        );
        self
    }

    pub fn with_taxonomy(mut self, name: &str, singular_label: &str, object_types: &[&str]) -> Self {
        self.taxonomies.insert(
            name.to_string(),
            TaxonomyRecord {
                singular_label: singular_label.to_string(),
                public: true,
                object_types: object_types.iter().map(|s| s.to_string()).collect(),
                base_url: None,
            },
        );
        self
    }

    pub fn with_post(mut self, post: PostRecord) -> Self {
        self.posts.push(post);
        self
    }
}

/// In-memory store over a [`Site`]
#[derive(Debug, Clone, Default)]
pub struct SiteStore {
    site: Site,
}

impl SiteStore {
    pub fn new(site: Site) -> Self {
        Self { site }
    }

    /// Loads a site file (`.json`, `.yaml` or `.yml`)
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read site file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();

        let site: Site = match extension.as_str() {
            "json" => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse site file: {}", path.display()))?,
            "yaml" | "yml" => serde_yaml::from_str(&content)
                .with_context(|| format!("Failed to parse site file: {}", path.display()))?,
            _ => return Err(SiteError::UnknownFormat(path.display().to_string()).into()),
        };

        Ok(Self::new(site))
    }

    pub fn site(&self) -> &Site {
        &self.site
    }

    pub fn post(&self, id: PostId) -> Option<&PostRecord> {
        self.site.posts.iter().find(|post| post.id == id)
    }

    /// Render context of a post, or an error if it does not exist
    pub fn context(&self, id: PostId) -> Result<RenderContext, SiteError> {
        self.post(id)
            .map(PostRecord::context)
            .ok_or(SiteError::PostNotFound(id))
    }
}

impl ContentStore for SiteStore {
    fn public_taxonomies(&self, post_type: &str) -> Vec<String> {
        self.site
            .taxonomies
            .iter()
            .filter(|(_, tax)| tax.public && tax.object_types.iter().any(|t| t == post_type))
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn taxonomy(&self, taxonomy: &str) -> Option<TaxonomyInfo> {
        self.site.taxonomies.get(taxonomy).map(|tax| TaxonomyInfo {
            name: taxonomy.to_string(),
            singular_label: tax.singular_label.clone(),
        })
    }

    fn term_list_html(&self, post_id: PostId, taxonomy: &str, separator: &str) -> String {
        let Some(terms) = self.post(post_id).and_then(|post| post.terms.get(taxonomy)) else {
            return String::new();
        };

        let base = self
            .site
            .taxonomies
            .get(taxonomy)
            .and_then(|tax| tax.base_url.clone())
            .unwrap_or_else(|| format!("/{}", taxonomy));
        let base = base.trim_end_matches('/');

        terms
            .iter()
            .map(|term| format!("<a href=\"{}/{}/\" rel=\"tag\">{}</a>", base, term.slug, term.name))
            .collect::<Vec<_>>()
            .join(separator)
    }

    fn post_meta(&self, post_id: PostId) -> PostMeta {
        self.post(post_id)
            .map(|post| post.meta.clone())
            .unwrap_or_default()
    }

    fn post_type(&self, post_type: &str) -> Option<PostTypeInfo> {
        self.site.post_types.get(post_type).map(|record| PostTypeInfo {
            name: post_type.to_string(),
            singular_label: record.singular_label.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> SiteStore {
        SiteStore::new(
            Site::default()
                .with_post_type("movie", "Movie")
                .with_taxonomy("genre", "Genre", &["movie"])
                .with_taxonomy("tag", "Tag", &["post"])
                .with_post(
                    PostRecord::new(7, "movie")
                        .with_term("genre", "Drama", "drama")
                        .with_term("genre", "Noir", "noir")
                        .with_meta("director", "Lynch"),
                ),
        )
    }

    #[test]
    fn public_taxonomies_by_post_type() {
        let store = store();
        assert_eq!(store.public_taxonomies("movie"), vec!["genre"]);
        assert!(store.public_taxonomies("page").is_empty());
    }

    #[test]
    fn term_list_links() {
        let html = store().term_list_html(PostId(7), "genre", ", ");
        assert_eq!(
            html,
            "<a href=\"/genre/drama/\" rel=\"tag\">Drama</a>, <a href=\"/genre/noir/\" rel=\"tag\">Noir</a>"
        );
    }

    #[test]
    fn missing_terms_are_empty() {
        let store = store();
        assert_eq!(store.term_list_html(PostId(7), "tag", ", "), "");
        assert_eq!(store.term_list_html(PostId(99), "genre", ", "), "");
    }

    #[test]
    fn context_carries_post_content() {
        let store = SiteStore::new(
            Site::default().with_post(PostRecord::new(3, "post").with_content("<p>Hello</p>")),
        );

        let ctx = store.context(PostId(3)).unwrap();
        assert_eq!(ctx.post_type, "post");
        assert_eq!(ctx.raw_content, "<p>Hello</p>");
    }

    #[test]
    fn unknown_post() {
        let store = store();
        assert!(store.post_meta(PostId(99)).is_empty());
        assert!(matches!(store.context(PostId(99)), Err(SiteError::PostNotFound(_))));
    }

    #[test]
    fn load_json_and_yaml() {
        let dir = TempDir::new().unwrap();

        let json = dir.path().join("site.json");
        fs::write(
            &json,
            r#"{"post_types": {"post": {"singular_label": "Post"}},
                "posts": [{"id": 1, "post_type": "post", "meta": {"tags": [["a", "b"]]}}]}"#,
        )
        .unwrap();

        let yaml = dir.path().join("site.yml");
        fs::write(
            &yaml,
            "posts:\n  - id: 2\n    post_type: post\n    meta:\n      release_year: [\"1999\"]\n",
        )
        .unwrap();

        let from_json = SiteStore::load(&json).unwrap();
        assert_eq!(
            from_json.post_meta(PostId(1))["tags"],
            vec![MetaValue::List(vec!["a".into(), "b".into()])]
        );
        assert_eq!(from_json.post_type("post").unwrap().singular_label, "Post");

        let from_yaml = SiteStore::load(&yaml).unwrap();
        assert_eq!(
            from_yaml.post_meta(PostId(2))["release_year"],
            vec![MetaValue::Text("1999".into())]
        );
    }

    #[test]
    fn unknown_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("site.txt");
        fs::write(&path, "{}").unwrap();

        let err = SiteStore::load(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported site file format"));
    }
}
