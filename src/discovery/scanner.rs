//! File system scanner for template documents.
//!
//! Recursively scans directories for `.docx` files, skipping Word lock
//! files (`~$name.docx`) and anything the manifest excludes.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::manifest::Manifest;

/// A template found on disk.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TemplateFile {
    /// Directory the scan started from; output paths mirror the layout below it.
    pub root: PathBuf,
    pub path: PathBuf,
}

impl TemplateFile {
    /// A single file given directly; its parent directory is the root.
    pub fn standalone(path: &Path) -> Self {
        Self {
            root: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            path: path.to_path_buf(),
        }
    }
}

/// Check whether a path names a template document.
pub fn is_template(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with("~$") {
        return false;
    }
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"))
}

/// Scan a directory for templates, sorted by path.
pub fn scan_directory(root: &Path, manifest: &Manifest) -> Vec<TemplateFile> {
    if !root.exists() {
        return vec![];
    }

    let mut files: Vec<TemplateFile> = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| {
            let excluded = manifest.is_excluded(path);
            if excluded {
                debug!(path = %path.display(), "excluded by manifest");
            }
            !excluded && is_template(path)
        })
        .map(|path| TemplateFile {
            root: root.to_path_buf(),
            path,
        })
        .collect();

    files.sort();
    files
}

/// Collect templates from a mix of files and directories.
///
/// Files are taken as given; directories are scanned recursively.
pub fn scan_paths(paths: &[PathBuf], manifest: &Manifest) -> Vec<TemplateFile> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            files.extend(scan_directory(path, manifest));
        } else {
            files.push(TemplateFile::standalone(path));
        }
    }

    files
}
