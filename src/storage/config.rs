//! Configuration handling for Display Custom Fields
//!
//! Configuration is read from `--config PATH`, then `./dcf.toml`, then
//! `~/.config/display-custom-fields/config.toml` (global). Missing files
//! fall back to defaults.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Sorter;
use crate::hooks::FailurePolicy;

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "dcf.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Where the block goes relative to the content
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Placement {
    #[default]
    Before,
    After,
}

impl Placement {
    pub fn as_str(&self) -> &str {
        match self {
            Placement::Before => "before",
            Placement::After => "after",
        }
    }

    pub fn is_before(&self) -> bool {
        *self == Placement::Before
    }
}

/// Settings that seed the render pipeline and the default callbacks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Class of the wrapping element; rows use `{css_class}-row` etc.
    pub css_class: String,

    /// Post types vetoed by the default display filter
    pub excluded_post_types: Vec<String>,

    /// Metadata keys starting with this prefix are never rendered
    pub hidden_prefix: String,

    /// Seed of the `dcf_before_content` chain
    pub placement: Placement,

    /// Seed of the `dcf_sorter` chain (ksort, krsort, asort, arsort, none)
    pub default_sorter: String,

    /// What happens when a callback fails
    pub on_callback_error: FailurePolicy,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            css_class: "meta".to_string(),
            excluded_post_types: vec!["page".to_string()],
            hidden_prefix: "_".to_string(),
            placement: Placement::Before,
            default_sorter: "ksort".to_string(),
            on_callback_error: FailurePolicy::Skip,
        }
    }
}

impl DisplayConfig {
    /// Resolves the configured default sorter
    pub fn sorter(&self) -> Result<Sorter, ConfigError> {
        self.default_sorter
            .parse()
            .map_err(|e: crate::domain::SorterError| ConfigError::Invalid(e.to_string()))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.css_class.trim().is_empty() {
            return Err(ConfigError::Invalid("css_class must not be empty".to_string()));
        }
        self.sorter().map(|_| ())
    }
}

/// Stylesheet served alongside the block
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesheetConfig {
    /// Registration handle
    pub handle: String,

    /// Public URL of the stylesheet
    pub url: String,

    /// Local file whose modification time versions the URL
    pub path: PathBuf,
}

impl Default for StylesheetConfig {
    fn default() -> Self {
        Self {
            handle: "display-custom-fields".to_string(),
            url: "style.css".to_string(),
            path: PathBuf::from("style.css"),
        }
    }
}

/// Log output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    #[serde(flatten)]
    pub display: DisplayConfig,

    pub stylesheet: StylesheetConfig,

    pub logging: LoggingConfig,

    /// Translation catalog for the plugin's text domain
    pub translations: HashMap<String, String>,

    /// File the configuration was read from
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from an explicit path or the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(&local);
        }

        match Self::global_config_path() {
            Some(path) if path.is_file() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Reads and validates a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        let mut config = Self::parse(&content)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        config.source = Some(path.to_path_buf());

        Ok(config)
    }

    /// Parses and validates TOML configuration
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.display.validate()?;
        Ok(config)
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("com", "balter", "display-custom-fields")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        Self::global_config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Directory relative paths in the config resolve against
    pub fn base_dir(&self) -> PathBuf {
        self.source
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
