//! Hook listing and stylesheet commands

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use super::output::Output;
use crate::hooks::names::{ENQUEUE_SCRIPTS, EXTENSION_HOOKS};
use crate::hooks::{HookRegistry, HookValue};
use crate::render::DisplayCustomFields;
use crate::storage::{AssetQueue, Config, SiteStore};

/// One callback on a hook; extension hooks without callbacks get a single
/// listing with the callback fields unset
#[derive(Debug, Serialize)]
struct HookListing {
    hook: String,
    priority: Option<i32>,
    arg_count: Option<usize>,
    callback: Option<String>,
}

fn listings<'a>(registry: &HookRegistry, hooks: impl IntoIterator<Item = &'a str>) -> Vec<HookListing> {
    let mut items = Vec::new();

    for hook in hooks {
        let entries = registry.registrations(hook);
        if entries.is_empty() {
            items.push(HookListing {
                hook: hook.to_string(),
                priority: None,
                arg_count: None,
                callback: None,
            });
        }

        items.extend(entries.iter().map(|entry| HookListing {
            hook: hook.to_string(),
            priority: Some(entry.priority),
            arg_count: Some(entry.arg_count),
            callback: Some(entry.name.clone()),
        }));
    }

    items
}

fn column<T: ToString>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(ToString::to_string)
        .unwrap_or_else(|| "-".to_string())
}

/// Lists every extension hook with its default callbacks, then the host
/// attachments
pub fn list(output: &Output, config: &Config) -> Result<()> {
    let extensions = HookRegistry::with_defaults(&config.display);
    let mut items = listings(&extensions, EXTENSION_HOOKS);

    let plugin = Arc::new(DisplayCustomFields::with_defaults(
        config,
        Arc::new(SiteStore::default()),
    )?);
    let mut host = HookRegistry::new();
    plugin.attach(&mut host);
    items.extend(listings(&host, host.hook_names()));

    if output.is_json() {
        output.data(&items);
        return Ok(());
    }

    output.row(&["HOOK", "PRIORITY", "ARGS", "CALLBACK"]);
    for item in &items {
        output.row(&[
            item.hook.as_str(),
            column(&item.priority).as_str(),
            column(&item.arg_count).as_str(),
            column(&item.callback).as_str(),
        ]);
    }

    Ok(())
}

/// Fires the asset action and prints the queued stylesheet
pub fn stylesheet(output: &Output, mut config: Config, base: Option<PathBuf>) -> Result<()> {
    // `--base` is relative to the working directory, not the config file
    if let Some(base) = base {
        let base = std::env::current_dir()
            .context("Failed to resolve the working directory")?
            .join(base);
        config.stylesheet.path = base.join(&config.stylesheet.path);
    }

    let plugin = Arc::new(DisplayCustomFields::with_defaults(
        &config,
        Arc::new(SiteStore::default()),
    )?);
    let mut host = HookRegistry::new().with_policy(plugin.renderer().registry().policy());
    plugin.attach(&mut host);

    let queue = AssetQueue::new();
    host.do_action(ENQUEUE_SCRIPTS, &[HookValue::Assets(queue.clone())])?;

    let styles = queue.stylesheets();
    if output.is_json() {
        output.data(&styles);
        return Ok(());
    }

    for style in &styles {
        let modified = style
            .modified
            .map(|time| time.to_rfc3339())
            .unwrap_or_else(|| "-".to_string());
        output.row(&[style.handle.as_str(), style.versioned_url().as_str(), modified.as_str()]);
    }

    Ok(())
}
