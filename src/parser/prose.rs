//! Narrative section extraction.
//!
//! Body paragraphs are grouped under the closest preceding header, where a
//! header is any paragraph with a heading style or a bold run.

use std::collections::BTreeMap;

use tracing::debug;

use crate::types::Paragraph;

/// Section header text mapped to its newline-joined body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProseMap {
    sections: BTreeMap<String, String>,
}

impl ProseMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, header: &str) -> Option<&str> {
        self.sections.get(header).map(String::as_str)
    }

    pub fn contains(&self, header: &str) -> bool {
        self.sections.contains_key(header)
    }

    pub fn insert(&mut self, header: impl Into<String>, body: impl Into<String>) {
        self.sections.insert(header.into(), body.into());
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Group paragraphs under their headers in one forward pass.
///
/// - Paragraphs before the first header are dropped.
/// - A header is flushed (even with an empty body) when the next header starts.
/// - The final header is only kept if it collected content.
/// - A header whose text is empty leaves no current header, so the
///   paragraphs after it are dropped too.
pub fn extract_prose(paragraphs: &[Paragraph]) -> ProseMap {
    let mut output = ProseMap::new();
    let mut current_header: Option<String> = None;
    let mut current_content: Vec<String> = Vec::new();

    for paragraph in paragraphs {
        let text = paragraph.text();

        if paragraph.is_header() {
            if let Some(header) = current_header.take() {
                output.insert(header, current_content.join("\n").trim());
                current_content.clear();
            }
            let header = text.trim();
            current_header = (!header.is_empty()).then(|| header.to_string());
        } else if current_header.is_some() {
            current_content.push(text.trim().to_string());
        } else {
            debug!("dropping paragraph outside any section");
        }
    }

    if let Some(header) = current_header {
        if !current_content.is_empty() {
            output.insert(header, current_content.join("\n").trim());
        }
    }

    output
}
