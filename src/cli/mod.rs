pub mod completions;
pub mod convert;
pub mod init;
pub mod validate;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use crate::discovery::{discover, scan_paths, DiscoveryResult};
use crate::error::Result;

/// docmdx - Convert dataset template documents into MDX pages
#[derive(Parser, Debug)]
#[command(name = "docmdx")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Manifest to use instead of ./docmdx.yaml
    #[arg(long, global = true)]
    pub manifest: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Convert .docx templates into .data.mdx pages
    Convert(convert::ConvertArgs),

    /// Check templates without writing any output
    Validate(validate::ValidateArgs),

    /// Initialize a docmdx project (generates docmdx.yaml)
    Init(init::InitArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}

/// Log filter for a `-v` count.
pub fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "docmdx=warn",
        1 => "docmdx=info",
        2 => "docmdx=debug",
        _ => "docmdx=trace",
    }
}

/// Discover the project and collect the templates a command should work on.
///
/// With no paths the manifest's template directory is used; otherwise the
/// given files and directories replace it.
pub(crate) fn resolve_inputs(
    paths: &[PathBuf],
    manifest_path: Option<&Path>,
) -> Result<DiscoveryResult> {
    let mut project = discover(".", manifest_path)?;
    if !paths.is_empty() {
        project.files = scan_paths(paths, &project.manifest);
    }
    Ok(project)
}
