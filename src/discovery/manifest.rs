//! Project manifest (docmdx.yaml) parsing.
//!
//! The manifest sets where templates are found, where pages are written,
//! the colour mode, and optional overrides of the schema tables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocError, Result};
use crate::types::{ColourMode, Schema};

/// Project manifest loaded from docmdx.yaml.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Manifest {
    /// Directory scanned for `.docx` templates in batch mode.
    pub template: PathBuf,

    /// Output root for rendered `.data.mdx` pages.
    pub output: PathBuf,

    /// How legend colour stops are written.
    pub colour: ColourMode,

    /// Patterns to exclude from discovery.
    pub excludes: Vec<String>,

    /// Schema table overrides; missing keys keep the built-in tables.
    pub schema: Schema,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            template: PathBuf::from("template"),
            output: PathBuf::from("markdown"),
            colour: ColourMode::default(),
            excludes: vec![],
            schema: Schema::default(),
        }
    }
}

impl Manifest {
    /// Load manifest from a docmdx.yaml file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| DocError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read manifest: {}", e),
        })?;

        Self::parse(&content)
    }

    /// Parse manifest from YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| DocError::Parse {
            message: format!("Invalid manifest: {}", e),
            help: Some("Check docmdx.yaml syntax".to_string()),
        })
    }

    /// Check if a path should be excluded based on exclude patterns.
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path = path.to_string_lossy().replace('\\', "/");
        self.excludes
            .iter()
            .any(|pattern| matches_pattern(&path, pattern))
    }
}

/// Simple glob matching.
///
/// - `*.ext` matches a suffix
/// - `dir/*` and `**/dir/*` match anything inside `dir`
/// - anything else matches as a substring
fn matches_pattern(path: &str, pattern: &str) -> bool {
    let anywhere = pattern.strip_prefix("**/");
    let pattern = anywhere.unwrap_or(pattern);

    if let Some(dir) = pattern.strip_suffix("/*") {
        let nested = format!("/{}/", dir);
        return path.starts_with(&nested[1..]) || path.contains(&nested);
    }

    if let Some(suffix) = pattern.strip_prefix('*') {
        if !suffix.contains('/') {
            return path.ends_with(suffix);
        }
    }

    path.contains(pattern)
}
