//! docmdx - Dataset template to MDX page converter
//!
//! Reads fixed-layout `.docx` templates (three tables plus narrative
//! sections), extracts their labeled fields into a metadata record and
//! renders a `.data.mdx` page: YAML frontmatter followed by ordered
//! `<Block>`/`<Prose>` sections.

pub mod assembler;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod types;
pub mod validation;

pub use assembler::assemble;
pub use discovery::{discover, DiscoveryResult, Manifest, TemplateFile, MANIFEST_FILENAME};
pub use error::{DocError, Result};
pub use parser::{extract_prose, read_document, ProseMap, TableInterpreter, TableRecords};
pub use pipeline::{convert_batch, output_path, BatchReport, Conversion, Converter};
pub use render::render_document;
pub use types::{
    Colour, ColourMode, Document, Field, LayerRecord, MetadataRecord, Paragraph, Row, Run, Schema,
    Table, SENTINEL,
};
pub use validation::{validate_records, Diagnostic, Severity, ValidationResult};
