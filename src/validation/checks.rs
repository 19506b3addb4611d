//! Document checks.
//!
//! The enumeration checks are fatal and used by the assembler. The rest
//! take extracted records and return a `ValidationResult` of warnings.

use crate::error::{DocError, Result};
use crate::parser::{GeneralRecord, ProseMap};
use crate::types::Schema;

use super::warning::{Diagnostic, ValidationResult};

const REQUIRED_GENERAL_FIELDS: &[&str] = &["id", "name", "description"];

/// Accept a colormap name only if it is in the schema, compared exactly.
pub fn check_colormap(value: &str, schema: &Schema) -> Result<String> {
    check_member(value, &schema.colormaps, "colormap")
}

/// Accept a projection id only if it is in the schema, compared exactly.
pub fn check_projection(value: &str, schema: &Schema) -> Result<String> {
    check_member(value, &schema.projections, "projection")
}

fn check_member(value: &str, allowed: &[String], kind: &str) -> Result<String> {
    if allowed.iter().any(|a| a == value) {
        return Ok(value.to_string());
    }
    Err(DocError::Validation {
        message: format!("Invalid {} '{}'", kind, value),
        help: Some(format!("Valid {}s: {}", kind, allowed.join(", "))),
    })
}

/// Warn about empty general fields and a missing media image.
pub fn check_general_fields(general: &GeneralRecord) -> ValidationResult {
    let mut result = ValidationResult::new();

    for key in REQUIRED_GENERAL_FIELDS {
        let missing = general.get(key).is_none_or(|f| f.is_missing());
        if missing {
            result.push(
                Diagnostic::warning(
                    "docmdx::validate::missing-field",
                    format!("General field '{}' is missing", key),
                )
                .with_help(format!("Fill in the '{}' row of the first table", key)),
            );
        }
    }

    let image_missing = general.media.as_ref().is_none_or(|m| m.image.is_missing());
    if image_missing {
        result.push(
            Diagnostic::warning("docmdx::validate::missing-media", "Media image is missing")
                .with_help("Add an `Image: <file name>` line to the media row"),
        );
    }

    result
}

/// Warn about layers that will be dropped and misaligned layer fields.
pub fn check_layers(general: &GeneralRecord) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (index, layer) in general.layers.iter().enumerate() {
        if layer.id.meaningful().is_none() {
            result.push(
                Diagnostic::warning(
                    "docmdx::validate::layer-dropped",
                    format!(
                        "Layer {} ('{}') has no id and will be left out",
                        index + 1,
                        layer.name
                    ),
                )
                .with_help("Add a `Layer id:` line for every `Layer name:`"),
            );
        }
    }

    for mismatch in &general.layer_mismatches {
        result.push(
            Diagnostic::warning(
                "docmdx::validate::layer-count",
                format!(
                    "'{}' appears {} times but there are {} layer names",
                    mismatch.label, mismatch.found, mismatch.expected
                ),
            )
            .with_help("Fields are matched to layers by position; trailing layers miss this field"),
        );
    }

    result
}

/// Warn about prose sections that have no place in the rendered page.
pub fn check_prose_sections(prose: &ProseMap, schema: &Schema) -> ValidationResult {
    let mut result = ValidationResult::new();

    for (header, _) in prose.iter() {
        let placed = schema
            .prose_top
            .iter()
            .chain(&schema.prose_bottom)
            .any(|h| h == header);
        if !placed {
            result.push(
                Diagnostic::warning(
                    "docmdx::validate::unplaced-section",
                    format!("Section '{}' is not rendered", header),
                )
                .with_help("Move optional sections into the third table as Header/Value rows"),
            );
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{CountMismatch, MediaFields};
    use crate::types::{Field, LayerRecord};

    #[test]
    fn test_colormap_exact_match() {
        let schema = Schema::default();
        assert_eq!(check_colormap("viridis", &schema).unwrap(), "viridis");

        let err = check_colormap("Viridis", &schema).unwrap_err();
        assert!(matches!(err, DocError::Validation { .. }));
        assert!(err.to_string().contains("'Viridis'"));
    }

    #[test]
    fn test_projection_reduced_schema() {
        let schema = Schema {
            projections: vec!["mercator".to_string()],
            ..Schema::default()
        };
        assert!(check_projection("mercator", &schema).is_ok());

        match check_projection("globe", &schema) {
            Err(DocError::Validation { help, .. }) => {
                assert_eq!(help.as_deref(), Some("Valid projections: mercator"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_general_fields_missing() {
        let mut general = GeneralRecord::default();
        general.fields.insert("id".to_string(), Field::from_raw("abc"));
        general.fields.insert("name".to_string(), Field::Missing);

        let result = check_general_fields(&general);
        let messages: Vec<String> = result.iter().map(|d| d.message.clone()).collect();
        assert_eq!(
            messages,
            vec![
                "General field 'name' is missing",
                "General field 'description' is missing",
                "Media image is missing",
            ]
        );
    }

    #[test]
    fn test_general_fields_complete() {
        let mut general = GeneralRecord::default();
        for key in REQUIRED_GENERAL_FIELDS {
            general.fields.insert(key.to_string(), Field::from_raw("x"));
        }
        general.media = Some(MediaFields {
            image: Field::from_raw("./media/a.png"),
            ..Default::default()
        });
        assert!(check_general_fields(&general).is_ok());
    }

    #[test]
    fn test_layers_dropped_and_mismatched() {
        let mut kept = LayerRecord::named("Kept");
        kept.id = Field::from_raw("kept");
        let mut dropped = LayerRecord::named("Dropped");
        dropped.id = Field::from_raw("none");

        let general = GeneralRecord {
            layers: vec![kept, dropped],
            layer_mismatches: vec![CountMismatch {
                label: "Units",
                found: 1,
                expected: 2,
            }],
            ..Default::default()
        };

        let result = check_layers(&general);
        assert_eq!(result.warning_count(), 2);
        assert!(result
            .iter()
            .any(|d| d.message == "Layer 2 ('Dropped') has no id and will be left out"));
    }

    #[test]
    fn test_unplaced_sections() {
        let mut prose = ProseMap::new();
        prose.insert("License", "MIT");
        prose.insert("Random Notes", "text");

        let result = check_prose_sections(&prose, &Schema::default());
        assert_eq!(result.warning_count(), 1);
        assert!(result.iter().all(|d| d.message.contains("Random Notes")));
    }
}
