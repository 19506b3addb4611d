//! Extraction from template documents.
//!
//! A template `.docx` is read into an abstract [`Document`](crate::types::Document)
//! and then taken apart in two independent passes:
//!
//! - [`TableInterpreter`] turns the three template tables into [`TableRecords`]
//! - [`extract_prose`] groups body paragraphs under their headers
//!
//! # Usage
//!
//! ```ignore
//! use docmdx::parser::{extract_prose, read_document, TableInterpreter};
//!
//! let document = read_document(Path::new("dataset.docx"))?;
//! let tables = TableInterpreter::interpret(&document)?;
//! let prose = extract_prose(&document.paragraphs);
//! ```

pub mod docx;
pub mod fields;
mod prose;
mod tables;

pub use docx::{parse_document_xml, read_document, StyleNames};
pub use fields::{
    extract_colour_groups, extract_layers, extract_media, extract_tags, normalize_media_path,
    CountMismatch, LayerExtraction, MediaFields, Rule, TagFields,
};
pub use prose::{extract_prose, ProseMap};
pub use tables::{
    DatasetRecord, ExtraSection, GeneralRecord, TableInterpreter, TableRecords,
};
