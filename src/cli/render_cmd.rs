//! Render and fields commands
//!
//! The command-line switches are applied the same way a third-party
//! extension would apply them: as callbacks on the extension hooks.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use super::output::Output;
use crate::domain::{PostId, Sorter};
use crate::hooks::names::{
    BEFORE_CONTENT, DEFAULT_PRIORITY, DISPLAY_CUSTOM_FIELDS, HEADING, SORTER, THE_CONTENT,
};
use crate::hooks::{HookRegistry, HookValue};
use crate::render::DisplayCustomFields;
use crate::storage::{Config, SiteStore};

/// Switches shared by `render` and `fields`
#[derive(Args, Debug, Clone)]
pub struct FieldsArgs {
    /// Site file (.json, .yaml or .yml)
    pub site: PathBuf,

    /// Post id
    pub post: u64,

    /// Sort strategy (ksort, krsort, asort, arsort, none)
    #[arg(long)]
    pub sort: Option<String>,

    /// Display fields on post types that are excluded by default
    #[arg(long)]
    pub show_excluded: bool,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub fields: FieldsArgs,

    /// Place the block after the content
    #[arg(long)]
    pub after: bool,

    /// Leave out the heading
    #[arg(long)]
    pub no_heading: bool,
}

/// Registers the callbacks equivalent to the command-line switches
fn apply_switches(registry: &mut HookRegistry, fields: &FieldsArgs, render: Option<&RenderArgs>) -> Result<()> {
    if let Some(name) = &fields.sort {
        let sorter: Sorter = name.parse()?;
        registry.add_filter(SORTER, "cli::sort", move |_, _| Ok(HookValue::Sorter(sorter.clone())));
    }

    if fields.show_excluded {
        registry.remove_filter(DISPLAY_CUSTOM_FIELDS, "post_type_filter", DEFAULT_PRIORITY);
    }

    if let Some(render) = render {
        if render.after {
            registry.add_filter(BEFORE_CONTENT, "cli::after", |_, _| Ok(HookValue::Bool(false)));
        }
        if render.no_heading {
            registry.add_filter(HEADING, "cli::no_heading", |_, _| Ok(HookValue::Text(String::new())));
        }
    }

    Ok(())
}

fn load(config: &Config, fields: &FieldsArgs, render: Option<&RenderArgs>) -> Result<(SiteStore, Arc<DisplayCustomFields>)> {
    let store = SiteStore::load(&fields.site)?;
    tracing::debug!(site = %fields.site.display(), posts = store.site().posts.len(), "site loaded");

    let mut registry = HookRegistry::with_defaults(&config.display);
    apply_switches(&mut registry, fields, render)?;

    let plugin = DisplayCustomFields::new(config, Arc::new(store.clone()), registry)?;
    Ok((store, Arc::new(plugin)))
}

/// Runs the host content filter for a post and prints the result
pub fn render(output: &Output, config: &Config, args: &RenderArgs) -> Result<()> {
    let (store, plugin) = load(config, &args.fields, Some(args))?;
    let ctx = store.context(PostId(args.fields.post))?;

    let mut host = HookRegistry::new().with_policy(plugin.renderer().registry().policy());
    plugin.attach(&mut host);

    let content = host
        .apply_filters(
            THE_CONTENT,
            HookValue::Text(ctx.raw_content.clone()),
            &[HookValue::Context(ctx.clone())],
        )?
        .into_text(THE_CONTENT)
        .context("Content filter returned unexpected output")?;

    output.text_or_json(&content, || {
        serde_json::json!({
            "post_id": ctx.post_id,
            "post_type": ctx.post_type,
            "content": content,
        })
    });

    Ok(())
}

/// Prints the final label/value rows for a post
pub fn fields(output: &Output, config: &Config, args: &FieldsArgs) -> Result<()> {
    let (store, plugin) = load(config, args, None)?;
    let ctx = store.context(PostId(args.post))?;

    let dataset = plugin.renderer().dataset(&ctx)?;

    if output.is_json() {
        output.data(&dataset);
        return Ok(());
    }

    match dataset {
        Some(dataset) => {
            for (label, value) in dataset.iter() {
                output.row(&[label, value]);
            }
        }
        None => tracing::info!(post = %ctx.post_id, post_type = %ctx.post_type, "display vetoed"),
    }

    Ok(())
}
