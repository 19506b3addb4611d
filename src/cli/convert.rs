//! Convert command implementation.
//!
//! Converts templates in parallel and writes one `.data.mdx` page per
//! document. A failing document does not stop the batch; the command exits
//! with an error after the tally if anything failed.

use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{DocError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{convert_batch, BatchReport, Converter, Failed};
use crate::types::ColourMode;
use crate::validation::print_diagnostics;

use super::resolve_inputs;

/// Convert .docx templates into .data.mdx pages
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Templates or directories (default: the manifest's template directory)
    pub paths: Vec<PathBuf>,

    /// Output directory (default: the manifest's output, `markdown`)
    #[arg(long, short)]
    pub output: Option<PathBuf>,

    /// Colour stop format
    #[arg(long, value_enum)]
    pub colour: Option<ColourMode>,
}

pub fn run(args: ConvertArgs, manifest_path: Option<&Path>, printer: &Printer) -> Result<()> {
    let project = resolve_inputs(&args.paths, manifest_path)?;
    let files = &project.files;

    if files.is_empty() {
        printer.warning("Skipping", "no .docx templates found");
        return Ok(());
    }

    let mut converter = Converter::from_manifest(&project.manifest);
    if let Some(colour) = args.colour {
        converter = converter.with_colour_mode(colour);
    }
    let out_dir = args.output.unwrap_or_else(|| project.output_dir());

    printer.status(
        "Converting",
        &format!(
            "{} to {}",
            plural(files.len(), "template", "templates"),
            display_path(&out_dir)
        ),
    );

    let report = convert_batch(&converter, files, Some(&out_dir));
    print_report(&report, printer);

    if report.is_success() {
        Ok(())
    } else {
        Err(DocError::Build {
            message: format!(
                "{} of {} failed to convert",
                report.failed.len(),
                plural(report.total(), "document", "documents")
            ),
            help: Some("Fix the reported documents and run the conversion again".to_string()),
        })
    }
}

fn print_report(report: &BatchReport, printer: &Printer) {
    for converted in &report.succeeded {
        if let Some(output) = &converted.output {
            printer.success("Wrote", &display_path(output));
        }
        if !converted.diagnostics.is_ok() {
            print_diagnostics(&converted.diagnostics, printer);
        }
    }

    for failed in &report.failed {
        print_failure(failed, printer);
    }

    printer.success(
        "Finished",
        &format!(
            "{} converted, {} failed",
            report.succeeded.len(),
            report.failed.len()
        ),
    );
}

fn print_failure(failed: &Failed, printer: &Printer) {
    printer.error(
        "Failed",
        &format!("{}: {}", display_path(&failed.source), failed.error),
    );
    if let Some(help) = miette::Diagnostic::help(&failed.error) {
        eprintln!("    {} {}", printer.dim("help:"), help);
    }
}
