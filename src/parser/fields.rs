//! Labeled-field extraction from free-text table cells.
//!
//! Template cells hold lines such as `Author name: J. Doe`. A [`Rule`]
//! finds `<label>: <value>` case-insensitively and captures the value up to
//! the end of its line. Three profiles are built on top of it:
//!
//! - single-match (media, tags): first occurrence per rule
//! - repeating (layers): every occurrence, correlated across rules by index
//! - bracket-list (colour stops): every `[...]` group split into tokens

use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Field, LayerRecord};

/// A labeled-value pattern.
#[derive(Debug, Clone)]
pub struct Rule {
    label: &'static str,
    regex: Regex,
}

impl Rule {
    /// Build a rule for `label`. The label is matched literally at a word boundary.
    pub fn new(label: &'static str) -> Self {
        let pattern = format!(r"(?i)\b{}:[ \t]*(.*)", regex::escape(label));
        Self {
            label,
            regex: Regex::new(&pattern).expect("escaped label is a valid regex"),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// First occurrence, or `Missing`.
    pub fn first(&self, text: &str) -> Field {
        Field::from_match(
            self.regex
                .captures(text)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str()),
        )
    }

    /// Every occurrence in document order. Empty values stay in the list as `Missing`
    /// so that positions line up with other rules.
    pub fn all(&self, text: &str) -> Vec<Field> {
        self.regex
            .captures_iter(text)
            .map(|c| Field::from_match(c.get(1).map(|m| m.as_str())))
            .collect()
    }
}

// -- Single-match profile --

static ALT_TEXT: LazyLock<Rule> = LazyLock::new(|| Rule::new("Image text (alt)"));
static AUTHOR_NAME: LazyLock<Rule> = LazyLock::new(|| Rule::new("Author name"));
static AUTHOR_URL: LazyLock<Rule> = LazyLock::new(|| Rule::new("Author URL"));

static TOPIC: LazyLock<Rule> = LazyLock::new(|| Rule::new("Topic"));
static SUBTOPIC: LazyLock<Rule> = LazyLock::new(|| Rule::new("Subtopic"));
static SOURCE: LazyLock<Rule> = LazyLock::new(|| Rule::new("Source"));
static PRODUCT_TYPE: LazyLock<Rule> = LazyLock::new(|| Rule::new("Product Type"));

static MEDIA_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\./media/\S+").expect("valid regex"));

/// Values from the `media` cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaFields {
    /// Normalized `./media/...` path.
    pub image: Field,
    pub alt_text: Field,
    pub author_name: Field,
    pub author_url: Field,
}

/// Values from the `tags` cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFields {
    pub topic: Field,
    pub subtopic: Field,
    pub source: Field,
    pub product_type: Field,
}

/// Extract the media block. The image path is taken from the first line.
pub fn extract_media(text: &str) -> MediaFields {
    let first_line = text.trim().lines().next().unwrap_or("");

    MediaFields {
        image: normalize_media_path(first_line),
        alt_text: ALT_TEXT.first(text),
        author_name: AUTHOR_NAME.first(text),
        author_url: AUTHOR_URL.first(text),
    }
}

/// Extract the tags block.
pub fn extract_tags(text: &str) -> TagFields {
    TagFields {
        topic: TOPIC.first(text),
        subtopic: SUBTOPIC.first(text),
        source: SOURCE.first(text),
        product_type: PRODUCT_TYPE.first(text),
    }
}

/// Point a media reference at the `./media/` directory.
///
/// A value already containing a `./media/<name>` path is kept verbatim;
/// otherwise the text after the last `": "` is treated as a file name.
pub fn normalize_media_path(line: &str) -> Field {
    let line = line.trim();
    if line.is_empty() {
        return Field::Missing;
    }

    if let Some(found) = MEDIA_PATH.find(line) {
        return Field::Provided(found.as_str().to_string());
    }

    let name = line.rsplit(": ").next().unwrap_or(line).trim();
    if name.is_empty() || name.ends_with(':') {
        return Field::Missing;
    }

    Field::Provided(format!("./media/{}", name))
}

// -- Repeating profile --

type Setter = fn(&mut LayerRecord, Field);

static LAYER_NAME: LazyLock<Rule> = LazyLock::new(|| Rule::new("Layer name"));

static LAYER_RULES: LazyLock<Vec<(Rule, Setter)>> = LazyLock::new(|| {
    let table: [(&'static str, Setter); 14] = [
        ("stacCol", |l, v| l.stac_col = v),
        ("Layer id", |l, v| l.id = v),
        ("Layer description", |l, v| l.description = v),
        ("Units", |l, v| l.units = v),
        ("Color ramp description", |l, v| l.color_ramp_description = v),
        ("Data format", |l, v| l.data_format = v),
        ("Projection", |l, v| l.projection = v),
        ("Legend minimum", |l, v| l.legend_minimum = v),
        ("Legend maximum", |l, v| l.legend_maximum = v),
        ("Legend type", |l, v| l.legend_type = v),
        ("Colormap name", |l, v| l.colormap_name = v),
        ("Resampling", |l, v| l.resampling = v),
        ("Rescale minimum", |l, v| l.rescale_min = v),
        ("Rescale maximum", |l, v| l.rescale_max = v),
    ];
    table
        .into_iter()
        .map(|(label, setter)| (Rule::new(label), setter))
        .collect()
});

/// A repeating field whose occurrence count differs from the number of layers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountMismatch {
    pub label: &'static str,
    pub found: usize,
    pub expected: usize,
}

/// Result of parsing a `layers` cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerExtraction {
    pub layers: Vec<LayerRecord>,
    pub mismatches: Vec<CountMismatch>,
}

/// Extract every layer described in a `layers` cell.
///
/// The number of `Layer name` occurrences decides how many layers exist.
/// Field `i` of every other rule belongs to layer `i`; a rule with fewer
/// occurrences leaves the trailing layers without that field.
pub fn extract_layers(text: &str) -> LayerExtraction {
    let names = LAYER_NAME.all(text);
    let mut layers: Vec<LayerRecord> = names
        .into_iter()
        .map(|name| LayerRecord {
            name,
            ..Default::default()
        })
        .collect();
    let expected = layers.len();
    let mut mismatches = Vec::new();

    for (rule, set) in LAYER_RULES.iter() {
        let values = rule.all(text);
        if !values.is_empty() && values.len() != expected {
            mismatches.push(CountMismatch {
                label: rule.label(),
                found: values.len(),
                expected,
            });
        }
        for (layer, value) in layers.iter_mut().zip(values) {
            set(layer, value);
        }
    }

    let groups = extract_colour_groups(text);
    if !groups.is_empty() && groups.len() != expected {
        mismatches.push(CountMismatch {
            label: "Color stops",
            found: groups.len(),
            expected,
        });
    }
    for (layer, group) in layers.iter_mut().zip(groups) {
        layer.color_stops = Some(group);
    }

    LayerExtraction { layers, mismatches }
}

// -- Bracket-list profile --

static BRACKET_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]").expect("valid regex"));

/// Extract every `[...]` group as a list of raw colour tokens.
///
/// Tokens are split on commas outside parentheses, so `rgb(1, 2, 3)`
/// stays whole. Quotes and whitespace are trimmed and empty tokens dropped.
pub fn extract_colour_groups(text: &str) -> Vec<Vec<String>> {
    BRACKET_GROUP
        .captures_iter(text)
        .filter_map(|c| c.get(1))
        .map(|m| split_tokens(m.as_str()))
        .collect()
}

fn split_tokens(group: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut current = String::new();

    for ch in group.chars() {
        match ch {
            '(' => {
                depth += 1;
                current.push(ch);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(ch);
            }
            ',' if depth == 0 => tokens.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    tokens.push(current);

    tokens
        .into_iter()
        .map(|t| {
            t.trim_matches(|c: char| c.is_whitespace() || c == '\'' || c == '"')
                .to_string()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MEDIA: &str = "Image: photo.png\nImage text (alt): A glacier\nAuthor name: J. Doe\nAuthor URL: https://x.org";

    #[test]
    fn test_rule_first_match() {
        let rule = Rule::new("Author name");
        assert_eq!(rule.first("Author name: J. Doe\n"), Field::from_raw("J. Doe"));
        assert_eq!(rule.first("author NAME:   Ann  \nx"), Field::from_raw("Ann"));
    }

    #[test]
    fn test_rule_missing_label() {
        let rule = Rule::new("Author name");
        assert_eq!(rule.first("Image: a.png\n"), Field::Missing);
        assert_eq!(rule.first("Author name:\nnext line"), Field::Missing);
    }

    #[test]
    fn test_rule_does_not_match_inside_words() {
        let text = "Subtopic: Ice\n";
        assert_eq!(TOPIC.first(text), Field::Missing);
        assert_eq!(SUBTOPIC.first(text), Field::from_raw("Ice"));
    }

    #[test]
    fn test_label_must_start_at_word_boundary() {
        let rule = Rule::new("Topic");
        assert_eq!(rule.first("MyTopic: hidden\n"), Field::Missing);
        assert_eq!(rule.first("(Topic: Water)"), Field::from_raw("Water)"));
        assert_eq!(rule.first("- Topic: Water\n"), Field::from_raw("Water"));
    }

    #[test]
    fn test_extract_media() {
        let media = extract_media(MEDIA);
        assert_eq!(media.image, Field::from_raw("./media/photo.png"));
        assert_eq!(media.alt_text, Field::from_raw("A glacier"));
        assert_eq!(media.author_name, Field::from_raw("J. Doe"));
        assert_eq!(media.author_url, Field::from_raw("https://x.org"));
    }

    #[test]
    fn test_extract_media_missing_fields() {
        let media = extract_media("Image: photo.png");
        assert_eq!(media.alt_text, Field::Missing);
        assert_eq!(media.author_url, Field::Missing);
    }

    #[test]
    fn test_normalize_media_path() {
        assert_eq!(
            normalize_media_path("./media/already.jpg"),
            Field::from_raw("./media/already.jpg")
        );
        assert_eq!(
            normalize_media_path("Image: see ./media/x.png please"),
            Field::from_raw("./media/x.png")
        );
        assert_eq!(
            normalize_media_path("Image: a: b.png"),
            Field::from_raw("./media/b.png")
        );
        assert_eq!(normalize_media_path("cover.png"), Field::from_raw("./media/cover.png"));
        assert_eq!(normalize_media_path("Image:"), Field::Missing);
        assert_eq!(normalize_media_path(""), Field::Missing);
    }

    #[test]
    fn test_extract_tags() {
        let tags = extract_tags("Topic: Water, Ice\nSubtopic: Snow\nSource: NASA\nProduct Type: Model");
        assert_eq!(tags.topic, Field::from_raw("Water, Ice"));
        assert_eq!(tags.subtopic, Field::from_raw("Snow"));
        assert_eq!(tags.source, Field::from_raw("NASA"));
        assert_eq!(tags.product_type, Field::from_raw("Model"));
    }

    #[test]
    fn test_extract_layers_correlates_by_index() {
        let text = "Layer name: First\nLayer id: first-id\nUnits: mm\n\
                    Layer name: Second\nLayer id: second-id\nRescale maximum: 10";
        let result = extract_layers(text);

        assert_eq!(result.layers.len(), 2);
        assert_eq!(result.layers[0].name, Field::from_raw("First"));
        assert_eq!(result.layers[0].id, Field::from_raw("first-id"));
        assert_eq!(result.layers[0].units, Field::from_raw("mm"));
        assert_eq!(result.layers[1].id, Field::from_raw("second-id"));
        // Only one `Units` line: the second layer must not borrow the first's value.
        assert_eq!(result.layers[1].units, Field::Missing);
        // Positional: the single rescale maximum belongs to the first layer.
        assert_eq!(result.layers[0].rescale_max, Field::from_raw("10"));
        assert_eq!(result.layers[1].rescale_max, Field::Missing);
    }

    #[test]
    fn test_extract_layers_reports_mismatches() {
        let text = "Layer name: A\nUnits: mm\nLayer name: B\n";
        let result = extract_layers(text);
        assert_eq!(
            result.mismatches,
            vec![CountMismatch {
                label: "Units",
                found: 1,
                expected: 2
            }]
        );
    }

    #[test]
    fn test_extract_layers_without_names() {
        let result = extract_layers("Layer id: orphan\n");
        assert!(result.layers.is_empty());
    }

    #[test]
    fn test_colour_groups() {
        let groups = extract_colour_groups("Color stops: ['#FF0000', '#00FF00', ]\nmore [ 0000FF ]");
        assert_eq!(
            groups,
            vec![
                vec!["#FF0000".to_string(), "#00FF00".to_string()],
                vec!["0000FF".to_string()],
            ]
        );
    }

    #[test]
    fn test_colour_groups_keep_rgb_functions() {
        let groups = extract_colour_groups("[rgb(1, 2, 3), rgb(4,5,6)]");
        assert_eq!(groups, vec![vec!["rgb(1, 2, 3)".to_string(), "rgb(4,5,6)".to_string()]]);
    }

    #[test]
    fn test_colour_stops_attach_to_layers() {
        let text = "Layer name: A\n[#000000, #FFFFFF]\nLayer name: B\n";
        let result = extract_layers(text);
        assert_eq!(
            result.layers[0].color_stops,
            Some(vec!["#000000".to_string(), "#FFFFFF".to_string()])
        );
        assert_eq!(result.layers[1].color_stops, None);
    }
}
