//! Core domain types for docmdx.
//!
//! This module contains the plain data passed between pipeline stages:
//! - `Document` - the abstract table/paragraph shape of a template
//! - `Field` - an extracted value that may be missing
//! - `LayerRecord` - raw per-layer values
//! - `Colour` - legend colour stops
//! - `Schema` - closed enumerations and section orderings
//! - `MetadataRecord` - the assembled frontmatter

mod colour;
mod document;
mod field;
mod layer;
mod metadata;
mod schema;

pub use colour::{Colour, ColourMode};
pub use document::{Document, Paragraph, Row, Run, Table};
pub use field::{is_placeholder, safe_float, Field, SENTINEL};
pub use layer::LayerRecord;
pub use metadata::{
    Author, CompareBlock, LayerBlock, LayerInfo, LayerMedia, Legend, LegendUnit, MediaBlock,
    MetadataRecord, Projection, SourceParams, TaxonomyEntry,
};
pub use schema::Schema;
