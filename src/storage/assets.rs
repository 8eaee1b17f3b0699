//! Stylesheet registration
//!
//! The stylesheet URL is versioned with the file's modification time so
//! browsers refetch it whenever it changes.

use std::fmt;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::config::StylesheetConfig;

/// A stylesheet queued for the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Stylesheet {
    pub handle: String,
    pub url: String,

    /// Cache-busting version (mtime in Unix seconds)
    pub version: Option<i64>,

    pub modified: Option<DateTime<Utc>>,
}

impl Stylesheet {
    /// URL with the version appended as `?ver=`
    pub fn versioned_url(&self) -> String {
        match self.version {
            Some(version) => {
                let separator = if self.url.contains('?') { '&' } else { '?' };
                format!("{}{}ver={}", self.url, separator, version)
            }
            None => self.url.clone(),
        }
    }
}

impl fmt::Display for Stylesheet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.handle, self.versioned_url())
    }
}

/// Builds the stylesheet registration; relative paths resolve against
/// `base_dir`
pub fn enqueue_stylesheet(config: &StylesheetConfig, base_dir: &Path) -> Stylesheet {
    let path = base_dir.join(&config.path);

    let modified = match path.metadata().and_then(|meta| meta.modified()) {
        Ok(time) => Some(DateTime::<Utc>::from(time)),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "stylesheet not readable, registering without version");
            None
        }
    };

    Stylesheet {
        handle: config.handle.clone(),
        url: config.url.clone(),
        version: modified.map(|time| time.timestamp()),
        modified,
    }
}

/// Stylesheets queued during one page load, shared with action callbacks
#[derive(Debug, Clone, Default)]
pub struct AssetQueue {
    styles: Arc<Mutex<Vec<Stylesheet>>>,
}

impl AssetQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a stylesheet; a handle is only queued once
    pub fn enqueue(&self, stylesheet: Stylesheet) {
        let mut styles = self.lock();
        if !styles.iter().any(|s| s.handle == stylesheet.handle) {
            styles.push(stylesheet);
        }
    }

    pub fn stylesheets(&self) -> Vec<Stylesheet> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Stylesheet>> {
        self.styles.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
