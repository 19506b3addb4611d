//! YAML frontmatter.

use crate::error::{DocError, Result};
use crate::types::MetadataRecord;

/// Serialize the record between `---` delimiters, followed by a blank line.
pub fn render_frontmatter(record: &MetadataRecord) -> Result<String> {
    let yaml = serde_yaml::to_string(record).map_err(|e| DocError::Build {
        message: format!("Failed to serialize frontmatter: {}", e),
        help: None,
    })?;
    Ok(format!("---\n{}---\n\n", yaml))
}
