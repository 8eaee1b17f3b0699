//! Domain models for Display Custom Fields
//!
//! Contains the data that flows through the render pipeline without any
//! I/O concerns.

mod context;
mod dataset;
mod sorter;

pub use context::{PostId, PostTypeInfo, RenderContext, TaxonomyInfo};
pub use dataset::{Dataset, LabelValueEntry, MetaValue, PostMeta};
pub use sorter::{CompareFn, Sorter, SorterError};
