//! Page rendering.
//!
//! A rendered page is the YAML frontmatter, the dataset summary block and
//! then the prose blocks: required-top sections in schema order, the
//! optional sections from the third table in encounter order, and
//! required-bottom sections in schema order. Sections missing from the
//! document are left out.

mod blocks;
mod frontmatter;

pub use blocks::{prose_block, summary_block};
pub use frontmatter::render_frontmatter;

use crate::error::Result;
use crate::parser::{ProseMap, TableRecords};
use crate::types::{MetadataRecord, Schema};

/// Render the full page for one document.
pub fn render_document(
    record: &MetadataRecord,
    tables: &TableRecords,
    prose: &ProseMap,
    schema: &Schema,
) -> Result<String> {
    let mut parts = vec![render_frontmatter(record)?, summary_block(&tables.dataset)];

    let section = |header: &str, body: &str| prose_block(header, body, !schema.is_untitled(header));

    parts.extend(
        schema
            .prose_top
            .iter()
            .filter_map(|h| prose.get(h).map(|body| section(h.as_str(), body))),
    );
    parts.extend(tables.extras.iter().map(|e| section(e.header.as_str(), e.body.as_str())));
    parts.extend(
        schema
            .prose_bottom
            .iter()
            .filter_map(|h| prose.get(h).map(|body| section(h.as_str(), body))),
    );

    Ok(strip_trailing_whitespace(&parts.concat()))
}

/// Remove trailing whitespace from every line; every line ends with `\n`.
pub fn strip_trailing_whitespace(text: &str) -> String {
    text.lines().map(|line| format!("{}\n", line.trim_end())).collect()
}
