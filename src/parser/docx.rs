//! `.docx` container reader.
//!
//! Reads `word/document.xml` (and `word/styles.xml` for style names) out of
//! the OOXML zip and produces the abstract [`Document`]: top-level tables
//! and top-level body paragraphs.

use std::collections::HashMap;
use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader as XmlReader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::{DocError, Result};
use crate::types::{Document, Paragraph, Row, Run, Table};

const DOC_XML_PATH: &str = "word/document.xml";
const STYLES_XML_PATH: &str = "word/styles.xml";
const DEFAULT_STYLE: &str = "Normal";

/// Style ids mapped to display names.
#[derive(Debug, Clone, Default)]
pub struct StyleNames {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleNames {
    /// Resolve the style of a paragraph from its `w:pStyle` id.
    pub fn resolve(&self, id: Option<&str>) -> String {
        match id {
            Some(id) => self
                .names
                .get(id)
                .cloned()
                .unwrap_or_else(|| id.to_string()),
            None => self
                .default_paragraph
                .clone()
                .unwrap_or_else(|| DEFAULT_STYLE.to_string()),
        }
    }

    /// Parse `word/styles.xml`.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = XmlReader::from_reader(xml.as_bytes());
        let mut buf = Vec::new();
        let mut styles = StyleNames::default();
        let mut current: Option<(String, bool)> = None;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(ref e)) if e.local_name().as_ref() == b"style" => {
                    let id = attr_value(e, b"styleId").unwrap_or_default();
                    let is_default_paragraph = attr_value(e, b"type").as_deref()
                        == Some("paragraph")
                        && matches!(attr_value(e, b"default").as_deref(), Some("1" | "true"));
                    current = Some((id, is_default_paragraph));
                }
                Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e))
                    if e.local_name().as_ref() == b"name" =>
                {
                    if let (Some((id, is_default)), Some(name)) =
                        (current.as_ref(), attr_value(e, b"val"))
                    {
                        let name = display_style_name(&name);
                        if *is_default {
                            styles.default_paragraph = Some(name.clone());
                        }
                        styles.names.insert(id.clone(), name);
                    }
                }
                Ok(Event::End(ref e)) if e.local_name().as_ref() == b"style" => current = None,
                Ok(Event::Eof) => break,
                Err(e) => return Err(xml_error(STYLES_XML_PATH, e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(styles)
    }
}

/// Built-in styles are stored lower-case (`heading 1`); Word shows them capitalized.
fn display_style_name(name: &str) -> String {
    if let Some(level) = name.strip_prefix("heading ") {
        return format!("Heading {}", level);
    }
    match name {
        "normal" => "Normal".to_string(),
        "title" => "Title".to_string(),
        _ => name.to_string(),
    }
}

/// Open and parse a `.docx` file.
pub fn read_document(path: &Path) -> Result<Document> {
    if !path.exists() {
        return Err(DocError::Io {
            path: path.to_path_buf(),
            message: "File not found".to_string(),
        });
    }

    let is_docx = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("docx"));
    if !is_docx {
        return Err(DocError::Parse {
            message: format!("'{}' is not a .docx file", path.display()),
            help: Some("Save the template as a Word document (.docx)".to_string()),
        });
    }

    let bytes = fs::read(path).map_err(|e| DocError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;
    if bytes.is_empty() {
        return Err(DocError::Parse {
            message: format!("'{}' is empty", path.display()),
            help: None,
        });
    }

    debug!(path = %path.display(), bytes = bytes.len(), "opened document");
    parse_docx_bytes(&bytes)
}

/// Parse an in-memory `.docx` archive.
pub fn parse_docx_bytes(bytes: &[u8]) -> Result<Document> {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(|e| DocError::Parse {
        message: format!("Failed to open docx archive: {}", e),
        help: Some("The file may be corrupt or not a Word document".to_string()),
    })?;

    let styles = match read_entry(&mut archive, STYLES_XML_PATH)? {
        Some(xml) => StyleNames::parse(&xml)?,
        None => StyleNames::default(),
    };

    let document_xml = read_entry(&mut archive, DOC_XML_PATH)?.ok_or_else(|| DocError::Parse {
        message: format!("docx archive has no {}", DOC_XML_PATH),
        help: None,
    })?;

    parse_document_xml(&document_xml, &styles)
}

fn read_entry(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<Option<String>> {
    let mut file = match archive.by_name(name) {
        Ok(file) => file,
        Err(zip::result::ZipError::FileNotFound) => return Ok(None),
        Err(e) => {
            return Err(DocError::Parse {
                message: format!("Failed to open {}: {}", name, e),
                help: None,
            })
        }
    };

    let mut xml = String::new();
    file.read_to_string(&mut xml).map_err(|e| DocError::Parse {
        message: format!("Failed to read {}: {}", name, e),
        help: None,
    })?;
    Ok(Some(xml))
}

/// Paragraph under construction.
#[derive(Debug, Default)]
struct ParagraphState {
    style_id: Option<String>,
    runs: Vec<Run>,
}

impl ParagraphState {
    fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    fn push_text(&mut self, text: &str) {
        match self.runs.last_mut() {
            Some(run) => run.text.push_str(text),
            None => self.runs.push(Run::new(text, false)),
        }
    }
}

/// Parse `word/document.xml` into tables and body paragraphs.
///
/// Only top-level tables are kept. Paragraphs inside tables become cell
/// text, joined with `\n`; they are not body paragraphs.
pub fn parse_document_xml(xml: &str, styles: &StyleNames) -> Result<Document> {
    let mut reader = XmlReader::from_reader(xml.as_bytes());
    reader.config_mut().trim_text(false);
    let mut buf = Vec::new();

    let mut document = Document::default();
    let mut table_depth = 0usize;
    let mut table = Table::default();
    let mut row: Option<Row> = None;
    let mut cell: Option<Vec<String>> = None;
    let mut paragraph: Option<ParagraphState> = None;
    let mut in_run = false;
    let mut in_text = false;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| xml_error(DOC_XML_PATH, e))?;

        match event {
            Event::Start(ref e) => match e.local_name().as_ref() {
                b"tbl" => {
                    table_depth += 1;
                    if table_depth == 1 {
                        table = Table::default();
                    }
                }
                b"tr" if table_depth == 1 => row = Some(Row::default()),
                b"tc" if table_depth == 1 => cell = Some(Vec::new()),
                b"p" if table_depth <= 1 => paragraph = Some(ParagraphState::default()),
                b"r" => {
                    in_run = true;
                    if let Some(p) = paragraph.as_mut() {
                        p.runs.push(Run::default());
                    }
                }
                b"t" if in_run => in_text = true,
                other => apply_property(other, e, in_run, paragraph.as_mut()),
            },
            Event::Empty(ref e) => match e.local_name().as_ref() {
                b"p" if table_depth <= 1 => {
                    finish_paragraph(
                        ParagraphState::default(),
                        table_depth,
                        &mut cell,
                        &mut document,
                        styles,
                    );
                }
                other => apply_property(other, e, in_run, paragraph.as_mut()),
            },
            Event::Text(ref t) if in_text => {
                if let Some(p) = paragraph.as_mut() {
                    let text = t.unescape().map_err(|e| xml_error(DOC_XML_PATH, e))?;
                    p.push_text(&text);
                }
            }
            Event::End(ref e) => match e.local_name().as_ref() {
                b"t" => in_text = false,
                b"r" => in_run = false,
                b"p" if table_depth <= 1 => {
                    if let Some(p) = paragraph.take() {
                        finish_paragraph(p, table_depth, &mut cell, &mut document, styles);
                    }
                }
                b"tc" if table_depth == 1 => {
                    if let (Some(paragraphs), Some(r)) = (cell.take(), row.as_mut()) {
                        r.cells.push(paragraphs.join("\n"));
                    }
                }
                b"tr" if table_depth == 1 => {
                    if let Some(r) = row.take() {
                        table.rows.push(r);
                    }
                }
                b"tbl" => {
                    if table_depth == 1 {
                        document.tables.push(std::mem::take(&mut table));
                    }
                    table_depth = table_depth.saturating_sub(1);
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!(
        tables = document.tables.len(),
        paragraphs = document.paragraphs.len(),
        "parsed document body"
    );
    Ok(document)
}

/// Handle run and paragraph property elements (`w:b`, `w:tab`, `w:pStyle`, ...).
fn apply_property(
    name: &[u8],
    e: &BytesStart<'_>,
    in_run: bool,
    paragraph: Option<&mut ParagraphState>,
) {
    let Some(p) = paragraph else {
        return;
    };
    match name {
        b"pStyle" if !in_run => p.style_id = attr_value(e, b"val"),
        b"b" if in_run => {
            let bold = !matches!(
                attr_value(e, b"val").as_deref(),
                Some("0" | "false" | "off")
            );
            if let Some(run) = p.runs.last_mut() {
                run.bold = bold;
            }
        }
        b"tab" if in_run => p.push_text("\t"),
        b"br" | b"cr" if in_run => p.push_text("\n"),
        _ => {}
    }
}

fn finish_paragraph(
    p: ParagraphState,
    table_depth: usize,
    cell: &mut Option<Vec<String>>,
    document: &mut Document,
    styles: &StyleNames,
) {
    if table_depth == 0 {
        document.paragraphs.push(Paragraph {
            style: styles.resolve(p.style_id.as_deref()),
            runs: p.runs,
        });
    } else if let Some(paragraphs) = cell.as_mut() {
        paragraphs.push(p.text());
    }
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    e.attributes()
        .filter_map(|a| a.ok())
        .find(|a| a.key.local_name().as_ref() == key)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

fn xml_error(part: &str, e: impl std::fmt::Display) -> DocError {
    DocError::Parse {
        message: format!("Malformed XML in {}: {}", part, e),
        help: Some("The file may be corrupt or not a Word document".to_string()),
    }
}
