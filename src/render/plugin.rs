//! Attachment to the host's own hooks
//!
//! The host exposes a content filter run once per rendered document and an
//! action run once per page load for asset registration. The plugin hooks
//! its renderer into the first and its stylesheet into the second.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context as _;

use super::pipeline::Renderer;
use crate::domain::RenderContext;
use crate::hooks::names::{DEFAULT_PRIORITY, ENQUEUE_SCRIPTS, THE_CONTENT};
use crate::hooks::{HookError, HookRegistry, HookValue};
use crate::storage::{
    enqueue_stylesheet, AssetQueue, Catalog, Config, ContentStore, Stylesheet, StylesheetConfig,
    TEXT_DOMAIN,
};

/// The plugin: a frozen extension registry, a renderer and its stylesheet
pub struct DisplayCustomFields {
    renderer: Renderer,
    stylesheet: StylesheetConfig,
    base_dir: PathBuf,
}

impl DisplayCustomFields {
    /// Builds the plugin around a registry that already holds the default
    /// callbacks and any extensions. The registry is read-only from here on.
    pub fn new(
        config: &Config,
        store: Arc<dyn ContentStore>,
        registry: HookRegistry,
    ) -> anyhow::Result<Self> {
        let catalog = Catalog::new(TEXT_DOMAIN, config.translations.clone());
        let renderer = Renderer::new(Arc::new(registry), store, &config.display)
            .context("Invalid display configuration")?
            .with_translator(Arc::new(catalog));

        Ok(Self {
            renderer,
            stylesheet: config.stylesheet.clone(),
            base_dir: config.base_dir(),
        })
    }

    /// Builds the plugin with only the default callbacks
    pub fn with_defaults(config: &Config, store: Arc<dyn ContentStore>) -> anyhow::Result<Self> {
        Self::new(config, store, HookRegistry::with_defaults(&config.display))
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Content filter entry point
    pub fn content_filter(&self, content: &str, ctx: &RenderContext) -> Result<String, HookError> {
        self.renderer.render(content, ctx)
    }

    /// Queues the plugin stylesheet
    pub fn enqueue_css(&self, queue: &AssetQueue) -> Stylesheet {
        let stylesheet = enqueue_stylesheet(&self.stylesheet, &self.base_dir);
        queue.enqueue(stylesheet.clone());
        stylesheet
    }

    /// Registers the content filter and the stylesheet action on the host
    pub fn attach(self: &Arc<Self>, host: &mut HookRegistry) {
        let plugin = Arc::clone(self);
        host.register(
            THE_CONTENT,
            DEFAULT_PRIORITY,
            2,
            "display_custom_fields::content_filter",
            move |value, args| {
                let content = value.into_text(THE_CONTENT)?;
                let Some(ctx) = args.first().and_then(HookValue::as_context) else {
                    tracing::debug!("content filter called without a render context");
                    return Ok(HookValue::Text(content));
                };
                Ok(HookValue::Text(plugin.content_filter(&content, ctx)?))
            },
        );

        let plugin = Arc::clone(self);
        host.register(
            ENQUEUE_SCRIPTS,
            DEFAULT_PRIORITY,
            1,
            "display_custom_fields::enqueue_css",
            move |value, _| {
                if let HookValue::Assets(queue) = &value {
                    plugin.enqueue_css(queue);
                }
                Ok(HookValue::Null)
            },
        );
    }
}
