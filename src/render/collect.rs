//! Collectors turning store data into label/value rows

use crate::domain::{LabelValueEntry, MetaValue, RenderContext};
use crate::hooks::names::{POSTMETA, POSTMETA_KEY, POSTMETA_VALUE, TAXONOMIES};
use crate::hooks::{HookError, HookRegistry, HookValue, KeyDecision};
use crate::storage::ContentStore;

/// Separator between linked terms of one taxonomy
pub const TERM_SEPARATOR: &str = ", ";

/// One row per taxonomy with terms on the post, labelled with the
/// taxonomy's singular name
pub struct TaxonomyCollector<'a> {
    registry: &'a HookRegistry,
    store: &'a dyn ContentStore,
}

impl<'a> TaxonomyCollector<'a> {
    pub fn new(registry: &'a HookRegistry, store: &'a dyn ContentStore) -> Self {
        Self { registry, store }
    }

    /// Rows in the order of the filtered taxonomy list
    pub fn collect(&self, ctx: &RenderContext) -> Result<Vec<LabelValueEntry>, HookError> {
        let taxonomies = self.store.public_taxonomies(&ctx.post_type);
        let taxonomies = self
            .registry
            .apply_filters(
                TAXONOMIES,
                HookValue::Taxonomies(taxonomies),
                &[HookValue::Context(ctx.clone())],
            )?
            .into_taxonomies(TAXONOMIES)?;

        let mut entries = Vec::new();
        for id in taxonomies {
            let Some(taxonomy) = self.store.taxonomy(&id) else {
                tracing::debug!(taxonomy = %id, "taxonomy not registered, skipping");
                continue;
            };

            let terms = self.store.term_list_html(ctx.post_id, &taxonomy.name, TERM_SEPARATOR);
            if terms.is_empty() {
                continue;
            }

            entries.push(LabelValueEntry::new(taxonomy.singular_label, terms));
        }

        Ok(entries)
    }
}

/// One row per displayable metadata key
pub struct MetadataCollector<'a> {
    registry: &'a HookRegistry,
    store: &'a dyn ContentStore,
}

impl<'a> MetadataCollector<'a> {
    pub fn new(registry: &'a HookRegistry, store: &'a dyn ContentStore) -> Self {
        Self { registry, store }
    }

    /// Rows in store key order; rows whose filtered key or value is empty
    /// are dropped
    pub fn collect(&self, ctx: &RenderContext) -> Result<Vec<LabelValueEntry>, HookError> {
        let context = HookValue::Context(ctx.clone());

        let meta = self.store.post_meta(ctx.post_id);
        let meta = self
            .registry
            .apply_filters(POSTMETA, HookValue::PostMeta(meta), std::slice::from_ref(&context))?
            .into_postmeta(POSTMETA)?;

        let mut entries = Vec::new();
        for (raw_key, values) in meta {
            let key = self
                .registry
                .apply_filters(
                    POSTMETA_KEY,
                    HookValue::Key(KeyDecision::Keep(raw_key.clone())),
                    std::slice::from_ref(&context),
                )?
                .into_key(POSTMETA_KEY)?;

            let first = values.into_iter().next().unwrap_or_default();
            let value = self
                .registry
                .apply_filters(
                    POSTMETA_VALUE,
                    HookValue::Meta(first),
                    &[HookValue::Key(key.clone()), context.clone()],
                )?
                .into_meta(POSTMETA_VALUE)?;

            match (key.as_label(), display_text(&value)) {
                (Some(label), Some(text)) => entries.push(LabelValueEntry::new(label, text)),
                _ => tracing::debug!(key = %raw_key, "metadata row dropped"),
            }
        }

        Ok(entries)
    }
}

fn display_text(value: &MetaValue) -> Option<String> {
    let text = value.to_display();
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostId;
    use crate::hooks::FailurePolicy;
    use crate::storage::{DisplayConfig, PostRecord, Site, SiteStore};

    fn store() -> SiteStore {
        SiteStore::new(
            Site::default()
                .with_post_type("movie", "Movie")
                .with_taxonomy("genre", "Genre", &["movie"])
                .with_taxonomy("studio", "Studio", &["movie"])
                .with_post(
                    PostRecord::new(1, "movie")
                        .with_term("genre", "Drama", "drama")
                        .with_meta("_edit_lock", "123")
                        .with_meta("release_year", "1999")
                        .with_meta("release_year", "2001")
                        .with_meta("empty", "")
                        .with_meta("cast", vec!["A".to_string(), "B".to_string()]),
                ),
        )
    }

    fn ctx() -> RenderContext {
        RenderContext::new(PostId(1), "movie")
    }

    #[test]
    fn taxonomies_without_terms_are_skipped() {
        let store = store();
        let registry = HookRegistry::with_defaults(&DisplayConfig::default());
        let entries = TaxonomyCollector::new(&registry, &store).collect(&ctx()).unwrap();

        assert_eq!(
            entries,
            vec![LabelValueEntry::new(
                "Genre",
                "<a href=\"/genre/drama/\" rel=\"tag\">Drama</a>"
            )]
        );
    }

    #[test]
    fn unknown_taxonomy_from_filter_contributes_nothing() {
        let store = store();
        let mut registry = HookRegistry::new();
        registry.add_filter(TAXONOMIES, "add-unknown", |value, _| {
            let mut list = value.into_taxonomies(TAXONOMIES)?;
            list.push("nonexistent".to_string());
            Ok(HookValue::Taxonomies(list))
        });

        let entries = TaxonomyCollector::new(&registry, &store).collect(&ctx()).unwrap();
        assert_eq!(entries.len(), 1);
    }

    fn two_taxonomy_store() -> SiteStore {
        SiteStore::new(
            Site::default()
                .with_post_type("movie", "Movie")
                .with_taxonomy("genre", "Genre", &["movie"])
                .with_taxonomy("studio", "Studio", &["movie"])
                .with_post(
                    PostRecord::new(2, "movie")
                        .with_term("genre", "Drama", "drama")
                        .with_term("studio", "Ghibli", "ghibli"),
                ),
        )
    }

    fn labels(entries: &[LabelValueEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.label.as_str()).collect()
    }

    #[test]
    fn taxonomy_rows_follow_filtered_order() {
        let store = two_taxonomy_store();
        let ctx = RenderContext::new(PostId(2), "movie");

        let registry = HookRegistry::new();
        let entries = TaxonomyCollector::new(&registry, &store).collect(&ctx).unwrap();
        assert_eq!(labels(&entries), vec!["Genre", "Studio"]);

        let mut registry = HookRegistry::new();
        registry.add_filter(TAXONOMIES, "reverse", |value, _| {
            let mut list = value.into_taxonomies(TAXONOMIES)?;
            list.reverse();
            Ok(HookValue::Taxonomies(list))
        });
        let entries = TaxonomyCollector::new(&registry, &store).collect(&ctx).unwrap();
        assert_eq!(labels(&entries), vec!["Studio", "Genre"]);
    }

    #[test]
    fn taxonomy_filter_can_remove_entries() {
        let store = two_taxonomy_store();
        let mut registry = HookRegistry::new();
        registry.add_filter(TAXONOMIES, "no-genre", |value, _| {
            let mut list = value.into_taxonomies(TAXONOMIES)?;
            list.retain(|taxonomy| taxonomy != "genre");
            Ok(HookValue::Taxonomies(list))
        });

        let entries = TaxonomyCollector::new(&registry, &store)
            .collect(&RenderContext::new(PostId(2), "movie"))
            .unwrap();
        assert_eq!(
            entries,
            vec![LabelValueEntry::new(
                "Studio",
                "<a href=\"/studio/ghibli/\" rel=\"tag\">Ghibli</a>"
            )]
        );
    }

    #[test]
    fn key_filter_receives_context() {
        let store = store();
        let mut registry = HookRegistry::with_defaults(&DisplayConfig::default());
        registry.register(POSTMETA_KEY, 20, 2, "tag-post-type", |value, args| {
            let key = value.into_key(POSTMETA_KEY)?;
            let Some(ctx) = args[0].as_context() else {
                anyhow::bail!("missing render context");
            };
            let post_type = ctx.post_type.clone();
            Ok(HookValue::Key(key.map(|label| format!("{} ({})", label, post_type))))
        });
        let registry = registry.with_policy(FailurePolicy::Propagate);

        let entries = MetadataCollector::new(&registry, &store).collect(&ctx()).unwrap();
        assert_eq!(labels(&entries), vec!["Release Year (movie)", "Cast (movie)"]);
    }

    #[test]
    fn metadata_uses_first_value_and_drops_hidden_and_empty() {
        let store = store();
        let registry = HookRegistry::with_defaults(&DisplayConfig::default());
        let entries = MetadataCollector::new(&registry, &store).collect(&ctx()).unwrap();

        assert_eq!(
            entries,
            vec![
                LabelValueEntry::new("Release Year", "1999"),
                LabelValueEntry::new("Cast", "A, B"),
            ]
        );
    }

    #[test]
    fn value_filter_receives_filtered_key() {
        let store = store();
        let mut registry = HookRegistry::with_defaults(&DisplayConfig::default());
        registry.register(POSTMETA_VALUE, 20, 2, "annotate", |value, args| {
            let value = value.into_meta(POSTMETA_VALUE)?;
            let label = match &args[0] {
                HookValue::Key(key) => key.as_label().unwrap_or("-").to_string(),
                _ => "?".to_string(),
            };
            Ok(HookValue::Text(format!("{} ({})", value.to_display(), label)))
        });

        let entries = MetadataCollector::new(&registry, &store).collect(&ctx()).unwrap();
        assert_eq!(entries[0], LabelValueEntry::new("Release Year", "1999 (Release Year)"));
    }

    #[test]
    fn bulk_postmeta_filter() {
        let store = store();
        let mut registry = HookRegistry::with_defaults(&DisplayConfig::default());
        registry.add_filter(POSTMETA, "only-cast", |value, _| {
            let mut meta = value.into_postmeta(POSTMETA)?;
            meta.retain(|key, _| key == "cast");
            Ok(HookValue::PostMeta(meta))
        });

        let entries = MetadataCollector::new(&registry, &store).collect(&ctx()).unwrap();
        assert_eq!(entries, vec![LabelValueEntry::new("Cast", "A, B")]);
    }
}
