//! Content transformer
//!
//! ```text
//! display_custom_fields ──false──▶ content unchanged
//!        │ true
//!        ▼
//! taxonomies + metadata ─▶ dcf_sorter ─▶ dcf_data ──empty──▶ content unchanged
//!                                           │
//!                                           ▼
//!                      heading + rows ─▶ dcf_before_content ─▶ block + content
//!                                                              or content + block
//! ```

use std::collections::HashSet;
use std::fmt::Write as _;
use std::sync::Arc;

use super::collect::{MetadataCollector, TaxonomyCollector};
use super::heading::HeadingBuilder;
use crate::domain::{Dataset, LabelValueEntry, RenderContext, Sorter};
use crate::hooks::names::{BEFORE_CONTENT, DATA, DISPLAY_CUSTOM_FIELDS, SORTER};
use crate::hooks::{HookError, HookRegistry, HookValue};
use crate::storage::{Catalog, ConfigError, ContentStore, DisplayConfig, Placement, Translate};

/// Renders the information block and splices it into post content
pub struct Renderer {
    registry: Arc<HookRegistry>,
    store: Arc<dyn ContentStore>,
    translator: Arc<dyn Translate>,
    css_class: String,
    sorter: Sorter,
    placement: Placement,
}

impl Renderer {
    /// Creates a renderer; fails if the configured default sorter is unknown
    pub fn new(
        registry: Arc<HookRegistry>,
        store: Arc<dyn ContentStore>,
        config: &DisplayConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            registry,
            store,
            translator: Arc::new(Catalog::passthrough()),
            css_class: config.css_class.clone(),
            sorter: config.sorter()?,
            placement: config.placement,
        })
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translate>) -> Self {
        self.translator = translator;
        self
    }

    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Runs the display veto
    pub fn should_display(&self, ctx: &RenderContext) -> Result<bool, HookError> {
        let display = self.registry.apply_filters(
            DISPLAY_CUSTOM_FIELDS,
            HookValue::Bool(true),
            &[HookValue::Context(ctx.clone())],
        )?;
        Ok(display.is_truthy())
    }

    /// Merges taxonomy rows and metadata rows; metadata wins on label
    /// collision
    pub fn collect(&self, ctx: &RenderContext) -> Result<Dataset, HookError> {
        let store = self.store.as_ref();
        let taxonomy = TaxonomyCollector::new(&self.registry, store).collect(ctx)?;
        let metadata = MetadataCollector::new(&self.registry, store).collect(ctx)?;

        let (dataset, overridden) = merge_rows(taxonomy, metadata);
        for label in overridden {
            tracing::debug!(label = %label, "metadata row overrides taxonomy row");
        }

        Ok(dataset)
    }

    /// Final rows for a post: `None` if vetoed, otherwise the sorted and
    /// filtered dataset with empty rows removed
    pub fn dataset(&self, ctx: &RenderContext) -> Result<Option<Dataset>, HookError> {
        if !self.should_display(ctx)? {
            tracing::debug!(post = %ctx.post_id, post_type = %ctx.post_type, "display vetoed");
            return Ok(None);
        }

        let context = [HookValue::Context(ctx.clone())];
        let mut dataset = self.collect(ctx)?;

        let sorter = self
            .registry
            .apply_filters(SORTER, HookValue::Sorter(self.sorter.clone()), &context)?
            .into_sorter(SORTER)?;
        tracing::debug!(sorter = sorter.name(), rows = dataset.len(), "sorting dataset");
        sorter.apply(&mut dataset);

        let mut dataset = self
            .registry
            .apply_filters(DATA, HookValue::Dataset(dataset), &context)?
            .into_dataset(DATA)?;
        dataset.retain_displayable();

        Ok(Some(dataset))
    }

    /// Renders the block for the post and places it around `content`
    ///
    /// Returns `content` unchanged when display is vetoed or nothing is left
    /// to show.
    pub fn render(&self, content: &str, ctx: &RenderContext) -> Result<String, HookError> {
        let dataset = match self.dataset(ctx)? {
            Some(dataset) if !dataset.is_empty() => dataset,
            Some(_) => {
                tracing::debug!(post = %ctx.post_id, "no rows to display");
                return Ok(content.to_string());
            }
            None => return Ok(content.to_string()),
        };

        let block = self.render_block(&dataset, ctx)?;

        let before = self
            .registry
            .apply_filters(
                BEFORE_CONTENT,
                HookValue::Bool(self.placement.is_before()),
                &[HookValue::Context(ctx.clone())],
            )?
            .is_truthy();

        Ok(if before {
            block + content
        } else {
            format!("{}{}", content, block)
        })
    }

    /// Builds the block markup: heading, one row per entry, clearing element
    pub fn render_block(&self, dataset: &Dataset, ctx: &RenderContext) -> Result<String, HookError> {
        let heading =
            HeadingBuilder::new(&self.registry, self.store.as_ref(), self.translator.as_ref())
                .build(ctx)?;

        Ok(block_markup(&self.css_class, &heading, dataset))
    }
}

/// Merges taxonomy rows then metadata rows, later labels winning
///
/// Also returns the taxonomy labels that metadata replaced, each once.
/// Metadata rows replacing other metadata rows are not reported.
fn merge_rows(
    taxonomy: Vec<LabelValueEntry>,
    metadata: Vec<LabelValueEntry>,
) -> (Dataset, Vec<String>) {
    let mut dataset = Dataset::new();
    dataset.extend_entries(taxonomy);

    let mut taxonomy_labels: HashSet<String> = dataset.labels().map(str::to_string).collect();
    let mut overridden = Vec::new();

    for entry in metadata {
        if taxonomy_labels.remove(&entry.label) {
            overridden.push(entry.label.clone());
        }
        dataset.insert(entry.label, entry.value);
    }

    (dataset, overridden)
}

/// Markup of the block; the shape is fixed, only the content varies
pub fn block_markup(css_class: &str, heading: &str, dataset: &Dataset) -> String {
    let mut output = format!("<div class=\"{}\">", css_class);
    output.push_str(heading);

    for (label, value) in dataset.iter() {
        let _ = write!(
            output,
            "\t<div class=\"{class}-row\">\n\
             \t\t<div class=\"{class}-label\">{label}:</div>\n\
             \t\t<div class=\"{class}-value\">{value}</div>\n\
             \t</div>\n",
            class = css_class,
            label = label,
            value = value,
        );
    }

    output.push_str("\t<div class=\"clearfix\">&nbsp;</div>\n");
    output.push_str("</div>\n");
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PostId;
    use crate::storage::{PostRecord, Site, SiteStore};

    fn renderer_with(registry: HookRegistry, site: Site) -> Renderer {
        Renderer::new(
            Arc::new(registry),
            Arc::new(SiteStore::new(site)),
            &DisplayConfig::default(),
        )
        .unwrap()
    }

    fn site() -> Site {
        Site::default()
            .with_post_type("post", "Post")
            .with_post_type("page", "Page")
            .with_taxonomy("genre", "Genre", &["post"])
            .with_post(
                PostRecord::new(1, "post")
                    .with_term("genre", "Drama", "drama")
                    .with_meta("_hidden", "x")
                    .with_meta("release_year", "1999")
                    .with_meta("Genre", "Override"),
            )
    }

    fn defaults() -> HookRegistry {
        HookRegistry::with_defaults(&DisplayConfig::default())
    }

    #[test]
    fn block_shape() {
        let dataset: Dataset = vec![("Year", "1999")].into_iter().collect();
        let markup = block_markup("meta", "<h2>Post Information</h2>", &dataset);

        assert_eq!(
            markup,
            "<div class=\"meta\"><h2>Post Information</h2>\
             \t<div class=\"meta-row\">\n\
             \t\t<div class=\"meta-label\">Year:</div>\n\
             \t\t<div class=\"meta-value\">1999</div>\n\
             \t</div>\n\
             \t<div class=\"clearfix\">&nbsp;</div>\n\
             </div>\n"
        );
    }

    #[test]
    fn metadata_overrides_taxonomy_label() {
        let renderer = renderer_with(defaults(), site());
        let dataset = renderer
            .dataset(&RenderContext::new(PostId(1), "post"))
            .unwrap()
            .unwrap();

        assert_eq!(dataset.get("Genre"), Some("Override"));
        assert_eq!(dataset.labels().collect::<Vec<_>>(), vec!["Genre", "Release Year"]);
    }

    #[test]
    fn merge_reports_only_taxonomy_overrides() {
        let (dataset, overridden) = merge_rows(
            vec![
                LabelValueEntry::new("Genre", "Drama"),
                LabelValueEntry::new("Studio", "Ghibli"),
            ],
            vec![
                LabelValueEntry::new("Release Year", "1999"),
                LabelValueEntry::new("Release Year", "2001"),
                LabelValueEntry::new("Genre", "Noir"),
                LabelValueEntry::new("Genre", "Western"),
            ],
        );

        assert_eq!(overridden, vec!["Genre".to_string()]);
        assert_eq!(dataset.get("Genre"), Some("Western"));
        assert_eq!(dataset.get("Release Year"), Some("2001"));
        assert_eq!(
            dataset.labels().collect::<Vec<_>>(),
            vec!["Genre", "Studio", "Release Year"]
        );
    }

    #[test]
    fn sorter_can_be_swapped_by_name() {
        let mut registry = defaults();
        registry.add_filter(SORTER, "reverse", |_, _| Ok(HookValue::from("krsort")));
        let renderer = renderer_with(registry, site());

        let dataset = renderer
            .dataset(&RenderContext::new(PostId(1), "post"))
            .unwrap()
            .unwrap();
        assert_eq!(dataset.labels().collect::<Vec<_>>(), vec!["Release Year", "Genre"]);
    }

    #[test]
    fn data_filter_can_suppress_block() {
        let mut registry = defaults();
        registry.add_filter(DATA, "kill", |_, _| Ok(HookValue::Bool(false)));
        let renderer = renderer_with(registry, site());

        let out = renderer
            .render("<p>body</p>", &RenderContext::new(PostId(1), "post"))
            .unwrap();
        assert_eq!(out, "<p>body</p>");
    }

    #[test]
    fn data_filter_empty_rows_never_render() {
        let mut registry = defaults();
        registry.add_filter(DATA, "add-empty", |value, _| {
            let mut dataset = value.into_dataset(DATA)?;
            dataset.insert("Blank", "");
            dataset.insert("", "orphan");
            Ok(HookValue::Dataset(dataset))
        });
        let renderer = renderer_with(registry, site());

        let out = renderer.render("", &RenderContext::new(PostId(1), "post")).unwrap();
        assert!(!out.contains("Blank:"));
        assert!(!out.contains("orphan"));
    }

    #[test]
    fn pages_are_left_alone() {
        let renderer = renderer_with(defaults(), site());
        let out = renderer
            .render("<p>page</p>", &RenderContext::new(PostId(1), "page"))
            .unwrap();

        assert_eq!(out, "<p>page</p>");
    }

    #[test]
    fn placement_after() {
        let mut registry = defaults();
        registry.add_filter(BEFORE_CONTENT, "after", |_, _| Ok(HookValue::Bool(false)));
        let renderer = renderer_with(registry, site());

        let out = renderer
            .render("<p>body</p>", &RenderContext::new(PostId(1), "post"))
            .unwrap();
        assert!(out.starts_with("<p>body</p><div class=\"meta\">"));
        assert!(out.ends_with("</div>\n"));
    }

    #[test]
    fn configured_class_and_placement() {
        let config = DisplayConfig {
            css_class: "info".to_string(),
            placement: Placement::After,
            ..DisplayConfig::default()
        };
        let renderer = Renderer::new(
            Arc::new(HookRegistry::with_defaults(&config)),
            Arc::new(SiteStore::new(site())),
            &config,
        )
        .unwrap();

        let out = renderer.render("X", &RenderContext::new(PostId(1), "post")).unwrap();
        assert!(out.starts_with("X<div class=\"info\">"));
        assert!(out.contains("<div class=\"info-label\">Release Year:</div>"));
    }

    #[test]
    fn unexpected_sorter_value_is_an_error() {
        let mut registry = defaults();
        registry.add_filter(SORTER, "bogus", |_, _| Ok(HookValue::Bool(true)));
        let renderer = renderer_with(registry, site());

        let err = renderer
            .render("", &RenderContext::new(PostId(1), "post"))
            .unwrap_err();
        assert!(matches!(err, HookError::UnexpectedValue { .. }));
    }
}
