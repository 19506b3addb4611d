//! Document conversion.
//!
//! [`Converter`] runs one document through table interpretation, prose
//! extraction, assembly and rendering. [`convert_batch`] does that for many
//! templates in parallel; a failed document is recorded and the rest carry
//! on. Output is only written once a document converted cleanly.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::assembler::assemble;
use crate::discovery::{Manifest, TemplateFile};
use crate::error::{DocError, Result};
use crate::parser::{extract_prose, read_document, TableInterpreter};
use crate::render::render_document;
use crate::types::{ColourMode, Document, MetadataRecord, Schema};
use crate::validation::{validate_records, ValidationResult};

const OUTPUT_EXTENSION: &str = "data.mdx";

/// A converted document.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub record: MetadataRecord,
    /// The full page: frontmatter, summary and prose blocks.
    pub rendered: String,
    pub diagnostics: ValidationResult,
}

/// Converts documents with one schema and colour mode.
#[derive(Debug, Clone, Default)]
pub struct Converter {
    schema: Schema,
    colour_mode: ColourMode,
}

impl Converter {
    pub fn new(schema: Schema, colour_mode: ColourMode) -> Self {
        Self {
            schema,
            colour_mode,
        }
    }

    pub fn from_manifest(manifest: &Manifest) -> Self {
        Self::new(manifest.schema.clone(), manifest.colour)
    }

    pub fn with_colour_mode(mut self, colour_mode: ColourMode) -> Self {
        self.colour_mode = colour_mode;
        self
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Convert an already-parsed document.
    pub fn convert(&self, document: &Document) -> Result<Conversion> {
        let tables = TableInterpreter::interpret(document)?;
        let prose = extract_prose(&document.paragraphs);
        let diagnostics = validate_records(&tables, &prose, &self.schema);

        let record = assemble(&tables, &self.schema, self.colour_mode)?;
        let rendered = render_document(&record, &tables, &prose, &self.schema)?;

        Ok(Conversion {
            record,
            rendered,
            diagnostics,
        })
    }

    /// Read and convert a `.docx` file.
    pub fn convert_file(&self, path: &Path) -> Result<Conversion> {
        info!(path = %path.display(), "converting");
        let document = read_document(path)?;
        let conversion = self.convert(&document)?;
        info!(
            path = %path.display(),
            layers = conversion.record.layers.len(),
            warnings = conversion.diagnostics.warning_count(),
            "converted"
        );
        Ok(conversion)
    }
}

/// Map `<root>/a/b.docx` to `<out_dir>/a/b.data.mdx`.
///
/// A source outside `root` keeps only its file name.
pub fn output_path(source: &Path, root: &Path, out_dir: &Path) -> PathBuf {
    let relative = source
        .strip_prefix(root)
        .ok()
        .filter(|r| !r.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| source.file_name().map(PathBuf::from))
        .unwrap_or_else(|| source.to_path_buf());

    out_dir.join(relative).with_extension(OUTPUT_EXTENSION)
}

/// Write through a temporary sibling file so a failed write leaves no partial page.
pub fn write_output(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| DocError::Io {
            path: parent.to_path_buf(),
            message: format!("Failed to create output directory: {}", e),
        })?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp = PathBuf::from(tmp_name);
    fs::write(&tmp, contents).map_err(|e| DocError::Io {
        path: tmp.clone(),
        message: format!("Failed to write output: {}", e),
    })?;
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        DocError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to move output into place: {}", e),
        }
    })
}

/// A document that converted.
#[derive(Debug)]
pub struct Converted {
    pub source: PathBuf,
    /// Where the page was written; `None` for check-only runs.
    pub output: Option<PathBuf>,
    pub diagnostics: ValidationResult,
}

/// A document that failed.
#[derive(Debug)]
pub struct Failed {
    pub source: PathBuf,
    pub error: DocError,
}

/// Outcome of a batch, in input order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub succeeded: Vec<Converted>,
    pub failed: Vec<Failed>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Convert many templates in parallel.
///
/// With `out_dir` set, each page is written to [`output_path`]; without it
/// documents are only converted and checked.
pub fn convert_batch(
    converter: &Converter,
    files: &[TemplateFile],
    out_dir: Option<&Path>,
) -> BatchReport {
    let outcomes: Vec<std::result::Result<Converted, Failed>> = files
        .par_iter()
        .map(|file| {
            convert_one(converter, file, out_dir).map_err(|error| {
                warn!(path = %file.path.display(), %error, "conversion failed");
                Failed {
                    source: file.path.clone(),
                    error,
                }
            })
        })
        .collect();

    let mut report = BatchReport::default();
    for outcome in outcomes {
        match outcome {
            Ok(converted) => report.succeeded.push(converted),
            Err(failed) => report.failed.push(failed),
        }
    }
    report
}

fn convert_one(
    converter: &Converter,
    file: &TemplateFile,
    out_dir: Option<&Path>,
) -> Result<Converted> {
    let conversion = converter.convert_file(&file.path)?;

    let output = match out_dir {
        Some(out_dir) => {
            let path = output_path(&file.path, &file.root, out_dir);
            write_output(&path, &conversion.rendered)?;
            Some(path)
        }
        None => None,
    };

    Ok(Converted {
        source: file.path.clone(),
        output,
        diagnostics: conversion.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Paragraph, Row, Table};
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::tempdir;
    use zip::write::SimpleFileOptions;
    use zip::ZipWriter;

    fn sample_document() -> Document {
        let table = |rows: &[(&str, &str)]| Table {
            rows: rows.iter().map(|(h, v)| Row::new(*h, *v)).collect(),
        };
        Document {
            tables: vec![
                table(&[
                    ("id", "sea-ice"),
                    ("name", "Sea Ice Extent"),
                    ("description", "Monthly Arctic sea ice"),
                    ("media", "Image: ice.png\nImage text (alt): Ice floes"),
                    ("tags", "Topic: Cryosphere\nSubtopic: Sea Ice\nSource: NSIDC"),
                    (
                        "layers",
                        "Layer name: Extent\nLayer id: extent\nstacCol: sea-ice-extent\n\
                         Colormap name: blues\nLegend type: gradient\nLegend minimum: 0\n\
                         Legend maximum: 100\nColor stops: [#FFFFFF, rgb(0, 0, 128)]",
                    ),
                ]),
                table(&[
                    ("content_source", "Value: null"),
                    ("temporal_extent", "Start: 01/01/1979\nEnd: 12/31/2023"),
                    ("temporal_resolution", "Value: Monthly"),
                ]),
                table(&[("optional 1", "Header: Methods\nValue: Passive microwave.")]),
            ],
            paragraphs: vec![
                Paragraph::plain("Normal", "dropped preamble"),
                Paragraph::plain("Heading 1", "Introduction paragraph"),
                Paragraph::plain("Normal", "Sea ice covers the Arctic."),
                Paragraph::bold("License"),
                Paragraph::plain("Normal", "CC-BY 4.0"),
            ],
        }
    }

    #[test]
    fn test_convert_document() {
        let conversion = Converter::default().convert(&sample_document()).unwrap();
        let layer = &conversion.record.layers[0];

        assert_eq!(layer.id, "extent");
        assert_eq!(layer.stac_col.as_deref(), Some("sea-ice-extent"));
        assert_eq!(
            layer.legend.as_ref().unwrap().stops,
            Some(vec!["rgb(255,255,255)".to_string(), "rgb(0,0,128)".to_string()])
        );
        assert_eq!(layer.info.source.as_deref(), Some("NSIDC"));

        let rendered = &conversion.rendered;
        assert!(rendered.starts_with("---\n"));
        assert!(rendered.contains("**Temporal Extent:** 01/01/1979 - 12/31/2023<br />"));
        assert!(rendered.contains("    ## Methods\n    Passive microwave."));
        assert!(!rendered.contains("dropped preamble"));
        assert!(
            rendered.find("Sea ice covers").unwrap() < rendered.find("## Methods").unwrap()
        );
        assert!(rendered.find("## Methods").unwrap() < rendered.find("## License").unwrap());
        assert!(conversion.diagnostics.is_ok(), "{:?}", conversion.diagnostics);
    }

    #[test]
    fn test_convert_is_idempotent() {
        let converter = Converter::default().with_colour_mode(ColourMode::Hex);
        let first = converter.convert(&sample_document()).unwrap();
        let second = converter.convert(&sample_document()).unwrap();
        assert_eq!(first.rendered, second.rendered);
        assert!(first.rendered.contains("'#FFFFFF'") || first.rendered.contains("\"#FFFFFF\""));
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(
                Path::new("template/ocean/sst.docx"),
                Path::new("template"),
                Path::new("markdown")
            ),
            PathBuf::from("markdown/ocean/sst.data.mdx")
        );
        assert_eq!(
            output_path(Path::new("/tmp/x/sst.docx"), Path::new("template"), Path::new("out")),
            PathBuf::from("out/sst.data.mdx")
        );
    }

    fn write_docx(path: &Path, body_xml: &str) {
        let file = fs::File::create(path).unwrap();
        let mut zip = ZipWriter::new(file);
        zip.start_file("word/document.xml", SimpleFileOptions::default())
            .unwrap();
        zip.write_all(body_xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    fn table_xml(rows: &[(&str, &str)]) -> String {
        let rows: String = rows
            .iter()
            .map(|(h, v)| {
                format!(
                    "<w:tr><w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc>\
                     <w:tc><w:p><w:r><w:t>{}</w:t></w:r></w:p></w:tc></w:tr>",
                    h, v
                )
            })
            .collect();
        format!(
            "<w:document xmlns:w=\"w\"><w:body><w:tbl>{}</w:tbl></w:body></w:document>",
            rows
        )
    }

    #[test]
    fn test_batch_records_failures_and_continues() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("template");
        let out = dir.path().join("markdown");
        fs::create_dir_all(root.join("nested")).unwrap();

        let good = root.join("nested/good.docx");
        write_docx(&good, &table_xml(&[("id", "good"), ("name", "Good")]));
        let bad = root.join("bad.docx");
        write_docx(&bad, &table_xml(&[("", "orphan value")]));
        let corrupt = root.join("corrupt.docx");
        fs::write(&corrupt, "not a zip").unwrap();

        let files: Vec<TemplateFile> = [&bad, &corrupt, &good]
            .iter()
            .map(|p| TemplateFile {
                root: root.clone(),
                path: p.to_path_buf(),
            })
            .collect();

        let report = convert_batch(&Converter::default(), &files, Some(&out));

        assert_eq!(report.total(), 3);
        assert!(!report.is_success());
        assert_eq!(report.succeeded.len(), 1);
        assert!(matches!(report.failed[0].error, DocError::Structure { .. }));
        assert!(matches!(report.failed[1].error, DocError::Parse { .. }));

        let written = out.join("nested/good.data.mdx");
        assert_eq!(report.succeeded[0].output.as_deref(), Some(written.as_path()));
        assert!(fs::read_to_string(&written).unwrap().contains("id: good"));
        assert!(!out.join("bad.data.mdx").exists());
        assert!(!out.join("bad.data.mdx.tmp").exists());
    }

    #[test]
    fn test_batch_check_only_writes_nothing() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("only.docx");
        write_docx(&path, &table_xml(&[("id", "only")]));

        let report = convert_batch(
            &Converter::default(),
            &[TemplateFile::standalone(&path)],
            None,
        );

        assert!(report.is_success());
        assert_eq!(report.succeeded[0].output, None);
        assert!(report.succeeded[0].diagnostics.warning_count() > 0);
    }
}
