//! Table interpretation.
//!
//! A template has three tables, each made of `header | value` rows:
//!
//! 0. general fields plus the `media`, `tags` and `layers` blocks
//! 1. dataset attributes written as `Value: ...`
//! 2. optional extra prose sections written as `Header: ...` / `Value: ...`
//!
//! [`TableInterpreter`] consumes rows table by table and produces
//! [`TableRecords`] once [`TableInterpreter::finalize`] resolves the one
//! cross-table dependency (the `content_source` fallback to the tag source).

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{DocError, Result};
use crate::types::{Document, Field, LayerRecord, Row, Table};

use super::fields::{
    extract_layers, extract_media, extract_tags, CountMismatch, MediaFields, TagFields,
};

static VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Value:\s(.*)").expect("valid regex"));
static START_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Start:\s*(\d{2}/\d{2}/\d{4})").expect("valid regex"));
static END_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)End:\s*(\d{2}/\d{2}/\d{4})").expect("valid regex"));
static HEADER_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)Header:\s*(.*?)\s*\n+\s*Value:\s*(.*)").expect("valid regex")
});

/// Table 0: general fields and the structured media/tags/layers blocks.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GeneralRecord {
    /// Plain rows keyed by lower-cased header, first line of the value.
    pub fields: BTreeMap<String, Field>,
    pub media: Option<MediaFields>,
    /// One entry per `tags` row, in document order.
    pub tags: Vec<TagFields>,
    pub layers: Vec<LayerRecord>,
    pub layer_mismatches: Vec<CountMismatch>,
}

impl GeneralRecord {
    pub fn get(&self, key: &str) -> Option<&Field> {
        self.fields.get(key)
    }

    /// Every `source` tag value collected so far.
    pub fn tag_sources(&self) -> Vec<Field> {
        self.tags.iter().map(|t| t.source.clone()).collect()
    }
}

/// Shown for dataset attributes whose row is absent from the document.
pub const NOT_AVAILABLE: &str = "N/A";

/// Table 1: dataset attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DatasetRecord {
    /// Attribute rows keyed by lower-cased header. Never empty lists.
    pub values: BTreeMap<String, Vec<Field>>,
    /// `None` when the document has no `temporal_extent` row.
    pub temporal_start: Option<Field>,
    pub temporal_end: Option<Field>,
}

impl DatasetRecord {
    /// First value of an attribute, `None` if the row is absent.
    pub fn first(&self, key: &str) -> Option<&Field> {
        self.values.get(key).and_then(|values| values.first())
    }

    /// Display text of an attribute: `N/A` when the row is absent, the
    /// sentinel when the row is present but empty.
    pub fn display(&self, key: &str) -> &str {
        self.first(key).map_or(NOT_AVAILABLE, Field::or_sentinel)
    }

    /// `start - end`, with the same absent/empty rules as [`display`](Self::display).
    pub fn temporal_extent(&self) -> String {
        let show = |f: &Option<Field>| f.as_ref().map_or(NOT_AVAILABLE, Field::or_sentinel).to_string();
        format!("{} - {}", show(&self.temporal_start), show(&self.temporal_end))
    }
}

/// One optional prose section from table 2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtraSection {
    /// Lower-cased first cell of the row.
    pub key: String,
    /// Text after `Header:`.
    pub header: String,
    /// Text after `Value:`, possibly several lines.
    pub body: String,
}

/// The three table records of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableRecords {
    pub general: GeneralRecord,
    pub dataset: DatasetRecord,
    pub extras: Vec<ExtraSection>,
}

/// `content_source` as read from table 1, before the fallback is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ContentSource {
    Values(Vec<Field>),
    /// The author wrote `Value: null`; use the tag source instead.
    FromTags,
}

/// Row dispatcher for the three template tables.
#[derive(Debug, Default)]
pub struct TableInterpreter {
    general: GeneralRecord,
    dataset: DatasetRecord,
    content_source: Option<ContentSource>,
    extras: Vec<ExtraSection>,
}

impl TableInterpreter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpret every table of a document.
    pub fn interpret(document: &Document) -> Result<TableRecords> {
        let mut interpreter = Self::new();
        for (index, table) in document.tables.iter().enumerate() {
            interpreter.feed_table(index, table)?;
        }
        Ok(interpreter.finalize())
    }

    /// Feed all rows of the table at position `index`.
    pub fn feed_table(&mut self, index: usize, table: &Table) -> Result<()> {
        if index > 2 {
            warn!(table = index, "ignoring table beyond the three template tables");
            return Ok(());
        }
        for (row_index, row) in table.rows.iter().enumerate() {
            self.feed_row(index, row_index, row)?;
        }
        Ok(())
    }

    /// Dispatch a single row.
    ///
    /// Rows with an empty header and an empty value are skipped. An empty
    /// header next to a value means the template was altered and is fatal.
    pub fn feed_row(&mut self, table: usize, row_index: usize, row: &Row) -> Result<()> {
        if row.cells.len() > 2 {
            warn!(table, row = row_index, cells = row.cells.len(), "row has extra cells");
        }

        let header = row
            .cell(0)
            .trim()
            .to_lowercase()
            .lines()
            .next()
            .unwrap_or("")
            .trim()
            .to_string();
        let value = row.cell(1).trim();

        if header.is_empty() {
            if value.is_empty() {
                debug!(table, row = row_index, "skipping empty row");
                return Ok(());
            }
            return Err(DocError::Structure {
                message: format!(
                    "Header is empty in table {} row {} but the value cell is not",
                    table + 1,
                    row_index + 1
                ),
                help: Some(
                    "Check the template document and ensure all expected headers are present and not empty"
                        .to_string(),
                ),
            });
        }

        debug!(table, row = row_index, header = %header, "dispatching row");
        match table {
            0 => self.general_row(header, value),
            1 => self.dataset_row(header, value),
            2 => self.extra_row(header, value),
            _ => {}
        }
        Ok(())
    }

    fn general_row(&mut self, header: String, value: &str) {
        match header.as_str() {
            "media" => self.general.media = Some(extract_media(value)),
            "tags" => self.general.tags.push(extract_tags(value)),
            "layers" => {
                let extraction = extract_layers(value);
                debug!(count = extraction.layers.len(), "parsed layer information");
                self.general.layers.extend(extraction.layers);
                self.general.layer_mismatches.extend(extraction.mismatches);
            }
            _ => {
                let first_line = value.lines().next().unwrap_or("");
                self.general.fields.insert(header, Field::from_raw(first_line));
            }
        }
    }

    fn dataset_row(&mut self, header: String, value: &str) {
        match header.as_str() {
            "content_source" => {
                let values = capture_values(value);
                let is_null = values
                    .first()
                    .and_then(Field::as_deref)
                    .is_some_and(|v| v.eq_ignore_ascii_case("null"));
                self.content_source = Some(if is_null {
                    ContentSource::FromTags
                } else {
                    ContentSource::Values(non_empty(values))
                });
            }
            "temporal_extent" => {
                self.dataset.temporal_start = Some(first_capture(&START_DATE, value));
                self.dataset.temporal_end = Some(first_capture(&END_DATE, value));
            }
            "legend_value_range" => {
                debug!("legend value range is set per layer; ignoring dataset row");
            }
            _ => {
                self.dataset
                    .values
                    .insert(header, non_empty(capture_values(value)));
            }
        }
    }

    fn extra_row(&mut self, key: String, value: &str) {
        let Some(captures) = HEADER_VALUE.captures(value) else {
            debug!(key = %key, "extra row without Header/Value pair");
            return;
        };
        let header = captures.get(1).map_or("", |m| m.as_str().trim());
        let body = captures.get(2).map_or("", |m| m.as_str().trim());
        if header.is_empty() || body.is_empty() {
            return;
        }

        let section = ExtraSection {
            key,
            header: header.to_string(),
            body: body.to_string(),
        };
        match self.extras.iter_mut().find(|s| s.key == section.key) {
            Some(existing) => *existing = section,
            None => self.extras.push(section),
        }
    }

    /// Resolve deferred values and hand out the finished records.
    pub fn finalize(self) -> TableRecords {
        let mut dataset = self.dataset;

        if let Some(source) = self.content_source {
            let values = match source {
                ContentSource::Values(values) => values,
                ContentSource::FromTags => {
                    debug!("content source is null; falling back to tag source");
                    non_empty(self.general.tag_sources())
                }
            };
            dataset.values.insert("content_source".to_string(), values);
        }

        TableRecords {
            general: self.general,
            dataset,
            extras: self.extras,
        }
    }
}

fn capture_values(text: &str) -> Vec<Field> {
    VALUE
        .captures_iter(text)
        .map(|c| Field::from_match(c.get(1).map(|m| m.as_str())))
        .collect()
}

fn first_capture(regex: &Regex, text: &str) -> Field {
    Field::from_match(regex.captures(text).and_then(|c| c.get(1)).map(|m| m.as_str()))
}

fn non_empty(values: Vec<Field>) -> Vec<Field> {
    if values.is_empty() {
        vec![Field::Missing]
    } else {
        values
    }
}
