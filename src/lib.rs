//! Display Custom Fields - taxonomy terms and custom metadata around post content
//!
//! Renders a label/value information block for a post and places it before
//! or after the post content. Every step of the pipeline runs through a
//! named hook so extensions can veto, reshape, reorder or move the block
//! without touching this crate.

pub mod domain;
pub mod hooks;
pub mod render;
pub mod storage;
pub mod cli;

pub use domain::{Dataset, LabelValueEntry, PostId, RenderContext, Sorter};
pub use hooks::{HookRegistry, HookValue, KeyDecision};
pub use render::{DisplayCustomFields, Renderer};
