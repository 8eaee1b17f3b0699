//! # Hook System
//!
//! Named extension points that third-party code attaches callbacks to.
//!
//! ## Overview
//!
//! Every step of the render pipeline passes its intermediate value through a
//! filter chain. Callbacks run in ascending priority order (default 10);
//! callbacks with equal priority run in the order they were registered.
//!
//! ## Extension Hooks
//!
//! | Hook | Seed | Extra args | Effect |
//! |------|------|------------|--------|
//! | `display_custom_fields` | `Bool(true)` | context | Falsy skips the block before any data is collected |
//! | `dcf_taxonomies` | `Taxonomies` | context | Add, remove or reorder displayed taxonomies |
//! | `dcf_postmeta` | `PostMeta` | context | Bulk transform of the raw metadata |
//! | `dcf_postmeta_key` | `Key(Keep(raw))` | context | Rename a key, or `Drop` the row |
//! | `dcf_postmeta_value` | `Meta(first value)` | key, context | Reshape a value; empty drops the row |
//! | `dcf_sorter` | `Sorter(ksort)` | context | Swap the sort strategy |
//! | `dcf_data` | `Dataset` | context | Final transform; empty suppresses the block |
//! | `dcf_heading` | `Text("<h2>…</h2>")` | context, post type | Empty removes the heading |
//! | `dcf_before_content` | `Bool(true)` | context | False appends instead of prepends |
//!
//! A callback's `arg_count` includes the chained value: with `arg_count = 1`
//! it sees no extra arguments, with `arg_count = 3` it sees two (missing
//! ones are `Null`).
//!
//! ## Failure Handling
//!
//! Under [`FailurePolicy::Skip`] a callback error is logged and the chain
//! continues with the value the callback received. Under
//! [`FailurePolicy::Propagate`] the error aborts the render.
//!
//! ## Key Types
//!
//! - [`HookRegistry`] - Registration and invocation
//! - [`HookValue`] - Values carried through chains
//! - [`KeyDecision`] - Keep or drop a metadata row

mod defaults;
pub mod names;
mod registry;
mod value;

pub use defaults::{
    format_postmeta_key, hidden_postmeta_filter, implode_array_filter, post_type_filter,
    register_defaults, HIDDEN_POSTMETA_PRIORITY,
};
pub use registry::{FailurePolicy, HookError, HookFn, HookRegistry, Registration};
pub use value::{HookValue, KeyDecision};
