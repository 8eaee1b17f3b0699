//! # Render Pipeline
//!
//! Builds the information block for a post and splices it into the post
//! content.
//!
//! ## Steps
//!
//! 1. `display_custom_fields` veto, checked before anything is collected
//! 2. Taxonomy rows, then metadata rows (metadata wins on label collision)
//! 3. Sort with the strategy resolved through `dcf_sorter`
//! 4. Final transform through `dcf_data`; empty rows are removed
//! 5. Heading plus one row per entry, then a clearing element
//! 6. Placement through `dcf_before_content`
//!
//! ## Key Types
//!
//! - [`Renderer`] - The pipeline
//! - [`DisplayCustomFields`] - Wires the renderer into a host registry
//! - [`TaxonomyCollector`], [`MetadataCollector`] - Row producers
//! - [`HeadingBuilder`] - Heading markup

mod collect;
mod heading;
mod pipeline;
mod plugin;

pub use collect::{MetadataCollector, TaxonomyCollector, TERM_SEPARATOR};
pub use heading::{HeadingBuilder, HEADING_SUFFIX};
pub use pipeline::{block_markup, Renderer};
pub use plugin::DisplayCustomFields;
