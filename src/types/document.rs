//! Abstract shape of a word-processing document.
//!
//! The extraction engine only needs ordered tables of two-cell rows and
//! ordered paragraphs made of styled runs. How the bytes were parsed is
//! not its concern.

/// A parsed template document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub tables: Vec<Table>,
    pub paragraphs: Vec<Paragraph>,
}

/// A table as an ordered list of rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

/// A table row; each cell is its text with paragraphs joined by `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<String>,
}

impl Row {
    pub fn new(header: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            cells: vec![header.into(), value.into()],
        }
    }

    /// Text of the cell at `index`, or an empty string if the row is short.
    pub fn cell(&self, index: usize) -> &str {
        self.cells.get(index).map(String::as_str).unwrap_or("")
    }
}

/// A body paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    /// Style name, e.g. `Normal` or `Heading 2`.
    pub style: String,
    pub runs: Vec<Run>,
}

impl Paragraph {
    /// A paragraph with a single non-bold run.
    pub fn plain(style: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            style: style.into(),
            runs: vec![Run::new(text, false)],
        }
    }

    /// A `Normal` paragraph with a single bold run.
    pub fn bold(text: impl Into<String>) -> Self {
        Self {
            style: "Normal".to_string(),
            runs: vec![Run::new(text, true)],
        }
    }

    /// Concatenated run text.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Heading style, or any bold run.
    pub fn is_header(&self) -> bool {
        self.style.starts_with("Heading") || self.runs.iter().any(|r| r.bold)
    }
}

/// A run of text sharing direct formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub bold: bool,
}

impl Run {
    pub fn new(text: impl Into<String>, bold: bool) -> Self {
        Self {
            text: text.into(),
            bold,
        }
    }
}
