//! Record assembly.
//!
//! Combines the table records into the published [`MetadataRecord`]:
//! identity fields, media, taxonomy, the info description and the cleaned
//! layer list. Colormaps and projections are checked here against the
//! injected [`Schema`]; everything else that is missing simply stays
//! [`Field::Missing`].

mod layers;

pub use layers::{build_layer, build_legend, build_source_params, convert_stops, LayerContext};

use tracing::debug;

use crate::error::Result;
use crate::parser::{DatasetRecord, MediaFields, TableRecords, TagFields};
use crate::types::{
    Author, ColourMode, Field, LayerInfo, MediaBlock, MetadataRecord, Schema, TaxonomyEntry,
};

/// Info description attributes in output order.
const INFO_ATTRIBUTES: &[(&str, &str)] = &[
    ("Temporal Resolution", "temporal_resolution"),
    ("Spatial Extent", "spatial_extent"),
    ("Spatial Resolution", "spatial_resolution"),
    ("Data Units", "data_units"),
    ("Data Type", "data_type"),
    ("Data Latency", "data_latency"),
];

/// Build the metadata record for one document.
pub fn assemble(
    tables: &TableRecords,
    schema: &Schema,
    colour_mode: ColourMode,
) -> Result<MetadataRecord> {
    let general = &tables.general;
    let id = general.get("id").cloned().unwrap_or_default();

    let ctx = LayerContext {
        dataset_id: id.or_sentinel().to_string(),
        info: layer_info(&tables.dataset),
        schema,
        colour_mode,
    };

    let mut layers = Vec::with_capacity(general.layers.len());
    for record in &general.layers {
        if let Some(block) = build_layer(record, &ctx)? {
            layers.push(block);
        }
    }
    debug!(
        parsed = general.layers.len(),
        kept = layers.len(),
        "assembled layers"
    );

    Ok(MetadataRecord {
        id,
        name: general.get("name").cloned().unwrap_or_default(),
        description: decode_description(general.get("description")),
        media: build_media(general.media.as_ref()),
        taxonomy: build_taxonomy(&general.tags),
        info_description: info_description(&tables.dataset),
        layers,
    })
}

/// Authors type JSON-style escapes (`\n`, `é`) into the description.
fn decode_description(field: Option<&Field>) -> Field {
    let Some(raw) = field.and_then(Field::as_deref) else {
        return Field::Missing;
    };
    match serde_json::from_str::<String>(&format!("\"{}\"", raw)) {
        Ok(decoded) => Field::from_raw(&decoded),
        Err(_) => Field::from_raw(raw),
    }
}

fn build_media(media: Option<&MediaFields>) -> MediaBlock {
    let media = media.cloned().unwrap_or_default();
    MediaBlock {
        src: match media.image.as_deref() {
            Some(path) => Field::Provided(format!("::file {}", path)),
            None => Field::Missing,
        },
        alt: media.alt_text,
        author: Author {
            name: media.author_name,
            url: media.author_url,
        },
    }
}

/// Topics, Subtopics and Source. Each takes the last provided value across `tags` rows.
fn build_taxonomy(tags: &[TagFields]) -> Vec<TaxonomyEntry> {
    vec![
        TaxonomyEntry {
            name: "Topics".to_string(),
            values: split_list(&last_provided(tags, |t| &t.topic)),
        },
        TaxonomyEntry {
            name: "Subtopics".to_string(),
            values: split_list(&last_provided(tags, |t| &t.subtopic)),
        },
        TaxonomyEntry {
            name: "Source".to_string(),
            values: vec![last_provided(tags, |t| &t.source)],
        },
    ]
}

fn last_provided(tags: &[TagFields], pick: fn(&TagFields) -> &Field) -> Field {
    tags.iter()
        .rev()
        .map(pick)
        .find(|f| !f.is_missing())
        .cloned()
        .unwrap_or_default()
}

/// Split a comma-separated value; an empty result is a single `Missing`.
fn split_list(field: &Field) -> Vec<Field> {
    let values: Vec<Field> = field
        .as_deref()
        .unwrap_or("")
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(Field::from_raw)
        .collect();

    if values.is_empty() {
        vec![Field::Missing]
    } else {
        values
    }
}

fn info_description(dataset: &DatasetRecord) -> String {
    let mut out = String::from("::markdown\n");
    out.push_str(&format!("- Temporal Extent: {}", dataset.temporal_extent()));
    for (label, key) in INFO_ATTRIBUTES {
        out.push_str(&format!("\n- {}: {}", label, dataset.display(key)));
    }
    out
}

fn layer_info(dataset: &DatasetRecord) -> LayerInfo {
    let first = |key: &str| dataset.first(key).cloned().unwrap_or_default();
    LayerInfo {
        source: first("content_source"),
        spatial_extent: first("spatial_extent"),
        temporal_resolution: first("temporal_resolution"),
        unit: first("data_units"),
    }
}
