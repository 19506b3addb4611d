//! Checks for template documents.
//!
//! Enumeration checks (colormap, projection) are fatal and run during
//! assembly. The remaining checks never fail a conversion; they report
//! gaps an author probably wants to fix. Used by `docmdx validate` and by
//! `docmdx convert` to print warnings.

mod checks;
mod warning;

pub use checks::{
    check_colormap, check_general_fields, check_layers, check_projection, check_prose_sections,
};
pub use warning::{Diagnostic, Severity, ValidationResult};

use crate::output::Printer;
use crate::parser::{ProseMap, TableRecords};
use crate::types::Schema;

/// Run all non-fatal checks against the extracted records.
pub fn validate_records(tables: &TableRecords, prose: &ProseMap, schema: &Schema) -> ValidationResult {
    let mut result = ValidationResult::new();

    result.merge(checks::check_general_fields(&tables.general));
    result.merge(checks::check_layers(&tables.general));
    result.merge(checks::check_prose_sections(prose, schema));

    result
}

/// Print diagnostics to stderr.
pub fn print_diagnostics(result: &ValidationResult, printer: &Printer) {
    for d in result.iter() {
        let label = printer.severity(&d.severity.to_string(), d.severity == Severity::Error);
        eprintln!("  {}[{}]: {}", label, d.code, d.message);
        if let Some(help) = &d.help {
            eprintln!("    {} {}", printer.dim("help:"), help);
        }
    }
}
