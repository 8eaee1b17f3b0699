//! Translation lookup for the plugin's user-visible strings

use std::collections::HashMap;

/// Text domain of every string this crate translates
pub const TEXT_DOMAIN: &str = "display-custom-fields";

/// String translation service
pub trait Translate: Send + Sync {
    /// Returns the translation of `text` in `domain`, or `text` itself
    fn translate(&self, text: &str, domain: &str) -> String;
}

/// Translation table for a single text domain
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    domain: String,
    entries: HashMap<String, String>,
}

impl Catalog {
    pub fn new(domain: impl Into<String>, entries: HashMap<String, String>) -> Self {
        Self {
            domain: domain.into(),
            entries,
        }
    }

    /// Catalog that returns every string unchanged
    pub fn passthrough() -> Self {
        Self::new(TEXT_DOMAIN, HashMap::new())
    }
}

impl Translate for Catalog {
    fn translate(&self, text: &str, domain: &str) -> String {
        if domain != self.domain {
            return text.to_string();
        }

        self.entries
            .get(text)
            .cloned()
            .unwrap_or_else(|| text.to_string())
    }
}
