//! Template discovery for docmdx projects.
//!
//! Finds `.docx` templates either from paths given on the command line or
//! from the `template` directory named in a `docmdx.yaml` manifest.
//!
//! # Example
//!
//! ```ignore
//! use docmdx::discovery::discover;
//!
//! let result = discover("./my-project", None)?;
//! println!("Found {} templates", result.files.len());
//! ```

mod manifest;
mod scanner;

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::Result;

pub use manifest::Manifest;
pub use scanner::{is_template, scan_directory, scan_paths, TemplateFile};

/// The name of the manifest file.
pub const MANIFEST_FILENAME: &str = "docmdx.yaml";

/// Result of discovering templates in a project.
#[derive(Debug)]
pub struct DiscoveryResult {
    /// The project root directory. Manifest paths are relative to it.
    pub root: PathBuf,

    /// The loaded manifest (default if no docmdx.yaml was found).
    pub manifest: Manifest,

    /// Whether a docmdx.yaml manifest was found.
    pub has_manifest: bool,

    /// Templates found below the manifest's template directory.
    pub files: Vec<TemplateFile>,
}

impl DiscoveryResult {
    /// Template directory, resolved against the project root.
    pub fn template_dir(&self) -> PathBuf {
        resolve(&self.root, &self.manifest.template)
    }

    /// Output directory, resolved against the project root.
    pub fn output_dir(&self) -> PathBuf {
        resolve(&self.root, &self.manifest.output)
    }
}

/// Load the manifest from an explicit path, or from `root/docmdx.yaml` if present.
pub fn load_manifest(root: &Path, explicit: Option<&Path>) -> Result<(Manifest, bool)> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => root.join(MANIFEST_FILENAME),
    };

    if explicit.is_some() || path.exists() {
        debug!(path = %path.display(), "loading manifest");
        Ok((Manifest::load(&path)?, true))
    } else {
        Ok((Manifest::default(), false))
    }
}

/// Discover templates in a project.
///
/// Uses `explicit` as the manifest when given, and its directory as the
/// project root; otherwise looks for `docmdx.yaml` in `root`. The
/// manifest's template directory (default `template/`) is then scanned.
pub fn discover(root: impl AsRef<Path>, explicit: Option<&Path>) -> Result<DiscoveryResult> {
    let root = match explicit.and_then(Path::parent) {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => root.as_ref().to_path_buf(),
    };
    let (manifest, has_manifest) = load_manifest(&root, explicit)?;

    let mut result = DiscoveryResult {
        root,
        manifest,
        has_manifest,
        files: Vec::new(),
    };
    result.files = scan_directory(&result.template_dir(), &result.manifest);
    debug!(
        root = %result.root.display(),
        templates = result.files.len(),
        "discovered project"
    );

    Ok(result)
}

fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() || root == Path::new(".") {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
