//! Heading shown above the rows

use crate::domain::{PostTypeInfo, RenderContext};
use crate::hooks::names::HEADING;
use crate::hooks::{HookError, HookRegistry, HookValue};
use crate::storage::{ContentStore, Translate, TEXT_DOMAIN};

/// Suffix appended to the post type label, translated at render time
pub const HEADING_SUFFIX: &str = " Information";

/// Builds `<h2>{Post type} Information</h2>` and passes it through the
/// heading filter. An empty result removes the heading but keeps the rows.
pub struct HeadingBuilder<'a> {
    registry: &'a HookRegistry,
    store: &'a dyn ContentStore,
    translator: &'a dyn Translate,
}

impl<'a> HeadingBuilder<'a> {
    pub fn new(
        registry: &'a HookRegistry,
        store: &'a dyn ContentStore,
        translator: &'a dyn Translate,
    ) -> Self {
        Self {
            registry,
            store,
            translator,
        }
    }

    pub fn build(&self, ctx: &RenderContext) -> Result<String, HookError> {
        let post_type = self.store.post_type(&ctx.post_type).unwrap_or_else(|| {
            tracing::debug!(post_type = %ctx.post_type, "post type not registered, using its name");
            PostTypeInfo {
                name: ctx.post_type.clone(),
                singular_label: ctx.post_type.clone(),
            }
        });

        let heading = format!(
            "<h2>{}{}</h2>",
            post_type.singular_label,
            self.translator.translate(HEADING_SUFFIX, TEXT_DOMAIN)
        );

        self.registry
            .apply_filters(
                HEADING,
                HookValue::Text(heading),
                &[HookValue::Context(ctx.clone()), HookValue::PostType(post_type)],
            )?
            .into_text(HEADING)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::PostId;
    use crate::storage::{Catalog, Site, SiteStore};

    fn store() -> SiteStore {
        SiteStore::new(Site::default().with_post_type("movie", "Movie"))
    }

    #[test]
    fn default_heading() {
        let store = store();
        let registry = HookRegistry::new();
        let catalog = Catalog::passthrough();
        let heading = HeadingBuilder::new(&registry, &store, &catalog)
            .build(&RenderContext::new(PostId(1), "movie"))
            .unwrap();

        assert_eq!(heading, "<h2>Movie Information</h2>");
    }

    #[test]
    fn translated_suffix() {
        let store = store();
        let registry = HookRegistry::new();
        let catalog = Catalog::new(
            TEXT_DOMAIN,
            HashMap::from([(HEADING_SUFFIX.to_string(), " Informationen".to_string())]),
        );
        let heading = HeadingBuilder::new(&registry, &store, &catalog)
            .build(&RenderContext::new(PostId(1), "movie"))
            .unwrap();

        assert_eq!(heading, "<h2>Movie Informationen</h2>");
    }

    #[test]
    fn filter_sees_post_type_and_can_remove_heading() {
        let store = store();
        let mut registry = HookRegistry::new();
        registry.register(HEADING, 10, 3, "check-args", |value, args| {
            assert!(args[0].as_context().is_some());
            assert!(matches!(&args[1], HookValue::PostType(pt) if pt.name == "movie"));
            Ok(value)
        });
        registry.add_filter(HEADING, "remove", |_, _| Ok(HookValue::Bool(false)));

        let catalog = Catalog::passthrough();
        let heading = HeadingBuilder::new(&registry, &store, &catalog)
            .build(&RenderContext::new(PostId(1), "movie"))
            .unwrap();

        assert_eq!(heading, "");
    }

    #[test]
    fn unknown_post_type_uses_name() {
        let store = store();
        let registry = HookRegistry::new();
        let catalog = Catalog::passthrough();
        let heading = HeadingBuilder::new(&registry, &store, &catalog)
            .build(&RenderContext::new(PostId(1), "recipe"))
            .unwrap();

        assert_eq!(heading, "<h2>recipe Information</h2>");
    }
}
