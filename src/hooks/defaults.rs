//! Built-in callbacks registered on every new plugin registry
//!
//! | Hook | Priority | Callback |
//! |------|----------|----------|
//! | `dcf_postmeta_key` | 5 | [`hidden_postmeta_filter`] |
//! | `dcf_postmeta_key` | 10 | [`format_postmeta_key`] |
//! | `dcf_postmeta_value` | 10 | [`implode_array_filter`] |
//! | `display_custom_fields` | 10 | [`post_type_filter`] |
//!
//! Suppression runs at 5 so an extension can slot in between suppression
//! and humanization (for example at priority 7).

use super::names::{DEFAULT_PRIORITY, DISPLAY_CUSTOM_FIELDS, POSTMETA_KEY, POSTMETA_VALUE};
use super::registry::HookRegistry;
use super::value::{HookValue, KeyDecision};
use crate::domain::MetaValue;
use crate::storage::DisplayConfig;

/// Priority of the hidden-key suppression callback
pub const HIDDEN_POSTMETA_PRIORITY: i32 = 5;

/// Characters that start a new word when capitalizing keys
const WORD_DELIMITERS: [char; 6] = [' ', '\t', '\r', '\n', '\x0C', '\x0B'];

/// Replaces underscores with spaces and capitalizes each word
///
/// Only ASCII letters are uppercased and only ASCII whitespace separates
/// words, so non-ASCII keys keep their spelling.
pub fn format_postmeta_key(key: &str) -> String {
    let mut formatted = String::with_capacity(key.len());
    let mut at_word_start = true;

    for ch in key.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        formatted.push(if at_word_start { ch.to_ascii_uppercase() } else { ch });
        at_word_start = WORD_DELIMITERS.contains(&ch);
    }

    formatted
}

/// Drops keys that start with the hidden prefix
pub fn hidden_postmeta_filter(key: KeyDecision, hidden_prefix: &str) -> KeyDecision {
    match key {
        KeyDecision::Keep(label) if !hidden_prefix.is_empty() && label.starts_with(hidden_prefix) => {
            KeyDecision::Drop
        }
        other => other,
    }
}

/// Joins array-valued metadata with `, `; text passes through
pub fn implode_array_filter(value: MetaValue) -> MetaValue {
    match value {
        MetaValue::List(items) => MetaValue::Text(items.join(", ")),
        text => text,
    }
}

/// Vetoes display for excluded post types and allows every other type
///
/// The incoming decision is ignored, so a veto registered before this
/// callback is reset for types that are not excluded.
pub fn post_type_filter(post_type: &str, excluded: &[String]) -> bool {
    !excluded.iter().any(|excluded| excluded == post_type)
}

/// Registers the default transform set
pub fn register_defaults(registry: &mut HookRegistry, config: &DisplayConfig) {
    let hidden_prefix = config.hidden_prefix.clone();
    registry.register(
        POSTMETA_KEY,
        HIDDEN_POSTMETA_PRIORITY,
        1,
        "hidden_postmeta_filter",
        move |value, _| {
            let key = value.into_key(POSTMETA_KEY)?;
            Ok(HookValue::Key(hidden_postmeta_filter(key, &hidden_prefix)))
        },
    );

    registry.register(
        POSTMETA_KEY,
        DEFAULT_PRIORITY,
        1,
        "format_postmeta_key",
        |value, _| {
            let key = value.into_key(POSTMETA_KEY)?;
            Ok(HookValue::Key(key.map(format_postmeta_key)))
        },
    );

    registry.register(
        POSTMETA_VALUE,
        DEFAULT_PRIORITY,
        1,
        "implode_array_filter",
        |value, _| {
            let value = value.into_meta(POSTMETA_VALUE)?;
            Ok(HookValue::Meta(implode_array_filter(value)))
        },
    );

    let excluded = config.excluded_post_types.clone();
    registry.register(
        DISPLAY_CUSTOM_FIELDS,
        DEFAULT_PRIORITY,
        2,
        "post_type_filter",
        move |value, args| {
            let Some(ctx) = args.first().and_then(HookValue::as_context) else {
                return Ok(value);
            };
            Ok(HookValue::Bool(post_type_filter(&ctx.post_type, &excluded)))
        },
    );
}

impl HookRegistry {
    /// Creates a registry holding the default transform set
    pub fn with_defaults(config: &DisplayConfig) -> Self {
        let mut registry = HookRegistry::new().with_policy(config.on_callback_error);
        register_defaults(&mut registry, config);
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PostId, RenderContext};

    fn registry() -> HookRegistry {
        HookRegistry::with_defaults(&DisplayConfig::default())
    }

    fn key_chain(registry: &HookRegistry, key: &str) -> KeyDecision {
        registry
            .apply_filters(POSTMETA_KEY, HookValue::Key(KeyDecision::Keep(key.into())), &[])
            .unwrap()
            .into_key(POSTMETA_KEY)
            .unwrap()
    }

    #[test]
    fn humanizes_keys() {
        assert_eq!(format_postmeta_key("custom_field"), "Custom Field");
        assert_eq!(format_postmeta_key("release_year"), "Release Year");
        assert_eq!(format_postmeta_key("already Fine"), "Already Fine");
        assert_eq!(format_postmeta_key("isbn"), "Isbn");
    }

    #[test]
    fn humanizing_only_touches_ascii() {
        assert_eq!(format_postmeta_key("ßtraße_ñame"), "ßtraße ñame");
        assert_eq!(format_postmeta_key("über\u{a0}cool"), "über\u{a0}cool");
        assert_eq!(format_postmeta_key("tab\tsplit"), "Tab\tSplit");
    }

    #[test]
    fn hidden_keys_are_dropped() {
        let registry = registry();

        assert_eq!(key_chain(&registry, "_secret"), KeyDecision::Drop);
        assert_eq!(
            key_chain(&registry, "custom_field"),
            KeyDecision::Keep("Custom Field".into())
        );
    }

    #[test]
    fn slot_between_suppression_and_humanization() {
        let mut registry = registry();
        registry.register(POSTMETA_KEY, 7, 1, "prefix", |value, _| {
            let key = value.into_key(POSTMETA_KEY)?;
            Ok(HookValue::Key(key.map(|k| format!("my_{}", k))))
        });

        assert_eq!(key_chain(&registry, "_secret"), KeyDecision::Drop);
        assert_eq!(key_chain(&registry, "color"), KeyDecision::Keep("My Color".into()));
    }

    #[test]
    fn arrays_are_imploded() {
        let registry = registry();
        let value = registry
            .apply_filters(
                POSTMETA_VALUE,
                HookValue::Meta(MetaValue::List(vec!["a".into(), "b".into(), "c".into()])),
                &[],
            )
            .unwrap();

        assert_eq!(
            value.into_meta(POSTMETA_VALUE).unwrap(),
            MetaValue::Text("a, b, c".into())
        );
    }

    #[test]
    fn pages_are_vetoed() {
        let registry = registry();
        let display = |post_type: &str| {
            registry
                .apply_filters(
                    DISPLAY_CUSTOM_FIELDS,
                    HookValue::Bool(true),
                    &[HookValue::Context(RenderContext::new(PostId(1), post_type))],
                )
                .unwrap()
                .is_truthy()
        };

        assert!(!display("page"));
        assert!(display("post"));
    }

    #[test]
    fn earlier_veto_is_reset_for_allowed_types() {
        let mut registry = registry();
        registry.register(DISPLAY_CUSTOM_FIELDS, 5, 1, "early-veto", |_, _| {
            Ok(HookValue::Bool(false))
        });
        let display = |post_type: &str| {
            registry
                .apply_filters(
                    DISPLAY_CUSTOM_FIELDS,
                    HookValue::Bool(true),
                    &[HookValue::Context(RenderContext::new(PostId(1), post_type))],
                )
                .unwrap()
                .is_truthy()
        };

        assert!(display("post"));
        assert!(!display("page"));
    }
}
