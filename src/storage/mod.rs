//! # Storage Layer
//!
//! Everything the render pipeline reads from outside: posts, taxonomies
//! and metadata, configuration, stylesheet files and translations.
//!
//! ## Sources
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Site (posts, taxonomies, metadata) | JSON or YAML | any path given to `SiteStore::load` |
//! | Config | TOML | `--config`, `./dcf.toml`, or the global config dir |
//! | Stylesheet | CSS | `stylesheet.path`, relative to the config file |
//!
//! ## Key Types
//!
//! - [`ContentStore`] - Data-access interface consumed by the collectors
//! - [`SiteStore`] - In-memory store over a site file
//! - [`Config`] - Display, stylesheet, logging and translation settings
//! - [`AssetQueue`] - Stylesheets queued during a page load
//! - [`Catalog`] - Translation table

mod assets;
mod config;
mod i18n;
mod site;
mod store;

pub use assets::{enqueue_stylesheet, AssetQueue, Stylesheet};
pub use config::{
    Config, ConfigError, DisplayConfig, LoggingConfig, Placement, StylesheetConfig,
    LOCAL_CONFIG_FILE,
};
pub use i18n::{Catalog, Translate, TEXT_DOMAIN};
pub use site::{PostRecord, PostTypeRecord, Site, SiteError, SiteStore, TaxonomyRecord, TermRecord};
pub use store::ContentStore;
