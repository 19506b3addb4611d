//! Explicit present/absent values for template fields.
//!
//! Authors leave template cells empty, delete labels, or type the sentinel
//! text themselves. All of these collapse into [`Field::Missing`]; the
//! sentinel string only reappears when a record is serialized.

use std::fmt;

use serde::{Serialize, Serializer};

/// Marker written wherever a value is missing from the source document.
pub const SENTINEL: &str = "Data not provided";

/// Strings that mean "nothing here" inside layer and numeric fields.
const PLACEHOLDERS: &[&str] = &["data not provided", "none", "null"];

/// A single extracted value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Field {
    Provided(String),
    #[default]
    Missing,
}

impl Field {
    /// Build a field from raw text, trimming it.
    ///
    /// Empty text and the sentinel itself (any case) are treated as missing.
    pub fn from_raw(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(SENTINEL) {
            Field::Missing
        } else {
            Field::Provided(trimmed.to_string())
        }
    }

    /// Build a field from an optional capture.
    pub fn from_match(raw: Option<&str>) -> Self {
        raw.map(Self::from_raw).unwrap_or_default()
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Field::Missing)
    }

    pub fn as_deref(&self) -> Option<&str> {
        match self {
            Field::Provided(value) => Some(value),
            Field::Missing => None,
        }
    }

    /// The value, unless it is a placeholder such as `none` or `null`.
    pub fn meaningful(&self) -> Option<&str> {
        self.as_deref().filter(|value| !is_placeholder(value))
    }

    /// The value as written, or the sentinel.
    pub fn or_sentinel(&self) -> &str {
        self.as_deref().unwrap_or(SENTINEL)
    }

    /// Parse the value as a number; placeholders and garbage are absent, never zero.
    pub fn to_f64(&self) -> Option<f64> {
        safe_float(self.as_deref()?)
    }
}

impl From<&str> for Field {
    fn from(raw: &str) -> Self {
        Self::from_raw(raw)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.or_sentinel())
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.or_sentinel())
    }
}

/// Check whether text is a "no value" placeholder (trimmed, any case).
pub fn is_placeholder(value: &str) -> bool {
    let cleaned = value.trim();
    cleaned.is_empty()
        || PLACEHOLDERS
            .iter()
            .any(|p| cleaned.eq_ignore_ascii_case(p))
}

/// Coerce text to a float. Placeholders and unparseable text yield `None`.
pub fn safe_float(value: &str) -> Option<f64> {
    if is_placeholder(value) {
        return None;
    }
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
