use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{DocError, Result};
use crate::output::{display_path, plural, Printer};
use crate::pipeline::{convert_batch, Converter, Failed};
use crate::validation::{print_diagnostics, Diagnostic, ValidationResult};

use super::resolve_inputs;

/// Check templates without writing any output
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Templates or directories (default: the manifest's template directory)
    pub paths: Vec<PathBuf>,

    /// Treat warnings as failures
    #[arg(long)]
    pub strict: bool,
}

pub fn run(args: ValidateArgs, manifest_path: Option<&Path>, printer: &Printer) -> Result<()> {
    let project = resolve_inputs(&args.paths, manifest_path)?;
    let files = &project.files;
    if files.is_empty() {
        printer.warning("Skipping", "no .docx templates found");
        return Ok(());
    }

    printer.status("Checking", &plural(files.len(), "template", "templates"));
    let report = convert_batch(&Converter::from_manifest(&project.manifest), files, None);

    let mut errors = 0;
    let mut warnings = 0;

    for converted in &report.succeeded {
        let diagnostics = &converted.diagnostics;
        errors += diagnostics.error_count();
        warnings += diagnostics.warning_count();

        if diagnostics.is_ok() {
            printer.success("Ok", &display_path(&converted.source));
        } else {
            printer.warning("Checked", &display_path(&converted.source));
            print_diagnostics(diagnostics, printer);
        }
    }
    for failed in &report.failed {
        let diagnostics = failure_diagnostics(failed);
        errors += diagnostics.error_count();

        printer.error("Failed", &display_path(&failed.source));
        print_diagnostics(&diagnostics, printer);
    }

    let failed = errors > 0 || (args.strict && warnings > 0);
    if failed {
        return Err(DocError::Validation {
            message: format!(
                "{}, {}",
                plural(errors, "error", "errors"),
                plural(warnings, "warning", "warnings")
            ),
            help: args
                .strict
                .then(|| "Warnings count as failures with --strict".to_string()),
        });
    }

    printer.success(
        "Finished",
        &format!("validation passed ({})", plural(warnings, "warning", "warnings")),
    );
    Ok(())
}

/// A document that could not be converted, as an error diagnostic.
fn failure_diagnostics(failed: &Failed) -> ValidationResult {
    let mut result = ValidationResult::new();
    result.push(Diagnostic::from(&failed.error));
    result
}
