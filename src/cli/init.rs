//! Init command implementation.
//!
//! Generates a `docmdx.yaml` manifest pointing at the directory that holds
//! the project's templates.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::discovery::{scan_directory, Manifest, MANIFEST_FILENAME};
use crate::error::{DocError, Result};
use crate::output::{display_path, plural, Printer};

/// Initialize a docmdx project by generating a docmdx.yaml manifest
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Project directory (default: current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite existing docmdx.yaml
    #[arg(long)]
    pub force: bool,
}

pub fn run(args: InitArgs, printer: &Printer) -> Result<()> {
    let manifest_path = args.path.join(MANIFEST_FILENAME);

    if manifest_path.exists() && !args.force {
        return Err(DocError::Build {
            message: format!("{} already exists", MANIFEST_FILENAME),
            help: Some("Use --force to overwrite".to_string()),
        });
    }

    printer.status("Scanning", &display_path(&args.path));
    let defaults = Manifest::default();
    let template_dir = pick_template_dir(&args.path, &defaults.template);
    let found = scan_directory(&args.path.join(&template_dir), &defaults).len();

    let yaml = format!(
        "# docmdx project manifest\n\
         template: {}\n\
         output: {}\n\
         colour: {}\n\
         excludes: []\n",
        template_dir.display(),
        defaults.output.display(),
        defaults.colour
    );

    fs::write(&manifest_path, &yaml).map_err(|e| DocError::Io {
        path: manifest_path.clone(),
        message: format!("Failed to write manifest: {}", e),
    })?;

    printer.success(
        "Created",
        &format!(
            "{} ({} found)",
            MANIFEST_FILENAME,
            plural(found, "template", "templates")
        ),
    );

    Ok(())
}

/// Use the conventional template directory if it exists, else the project root.
fn pick_template_dir(root: &Path, conventional: &Path) -> PathBuf {
    if root.join(conventional).is_dir() {
        conventional.to_path_buf()
    } else {
        PathBuf::from(".")
    }
}
