//! Colour type and parsing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DocError, Result};

/// An RGB colour value taken from a legend colour stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// How colour stops are written to the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColourMode {
    /// `rgb(r,g,b)`
    #[default]
    Rgb,
    /// `#RRGGBB`
    Hex,
}

impl Colour {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a colour token.
    ///
    /// Supports formats:
    /// - `#RRGGBB` or `RRGGBB`
    /// - `rgb(r, g, b)`
    /// - `(r, g, b)` or `r, g, b` numeric triples
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim().trim_matches(|c| c == '\'' || c == '"').trim();

        if let Some(inner) = strip_function(s, "rgb") {
            return Self::from_triple_str(inner, s);
        }

        if let Some(inner) = s.strip_prefix('(').and_then(|rest| rest.strip_suffix(')')) {
            return Self::from_triple_str(inner, s);
        }

        if s.contains(',') {
            return Self::from_triple_str(s, s);
        }

        Self::from_hex(s)
    }

    /// Parse a six digit hex colour with or without a leading `#`.
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);

        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid_colour(s));
        }

        Ok(Self::rgb(
            parse_hex_byte(&hex[0..2])?,
            parse_hex_byte(&hex[2..4])?,
            parse_hex_byte(&hex[4..6])?,
        ))
    }

    fn from_triple_str(inner: &str, original: &str) -> Result<Self> {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(invalid_colour(original));
        }

        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            *slot = part.parse::<u8>().map_err(|_| invalid_colour(original))?;
        }

        Ok(Self::rgb(channels[0], channels[1], channels[2]))
    }

    /// `#RRGGBB` with uppercase digits.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// `rgb(r,g,b)` without spaces.
    pub fn to_rgb_string(self) -> String {
        format!("rgb({},{},{})", self.r, self.g, self.b)
    }

    /// Format according to the output mode.
    pub fn format(self, mode: ColourMode) -> String {
        match mode {
            ColourMode::Rgb => self.to_rgb_string(),
            ColourMode::Hex => self.to_hex(),
        }
    }
}

impl fmt::Display for ColourMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColourMode::Rgb => write!(f, "rgb"),
            ColourMode::Hex => write!(f, "hex"),
        }
    }
}

/// Return the argument list of `name(...)`, matching the name case-insensitively.
fn strip_function<'a>(s: &'a str, name: &str) -> Option<&'a str> {
    let head = s.get(..name.len())?;
    if !head.eq_ignore_ascii_case(name) {
        return None;
    }
    s[name.len()..]
        .trim_start()
        .strip_prefix('(')?
        .strip_suffix(')')
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| invalid_colour(s))
}

fn invalid_colour(s: &str) -> DocError {
    DocError::Validation {
        message: format!("Invalid colour: '{}'", s),
        help: Some(
            "Use rgb(R,G,B), (R,G,B), #RRGGBB or RRGGBB for colour stops".to_string(),
        ),
    }
}
