//! The assembled frontmatter record.
//!
//! Field order here is the order keys appear in the rendered YAML.
//! Optional blocks use `skip_serializing_if` so that a layer without, say,
//! legend data has no `legend` key at all.

use serde::Serialize;

use super::field::Field;

/// Frontmatter for one dataset page.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub id: Field,
    pub name: Field,
    pub description: Field,
    pub media: MediaBlock,
    pub taxonomy: Vec<TaxonomyEntry>,
    pub info_description: String,
    pub layers: Vec<LayerBlock>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaBlock {
    pub src: Field,
    pub alt: Field,
    pub author: Author,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Author {
    pub name: Field,
    pub url: Field,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxonomyEntry {
    pub name: String,
    pub values: Vec<Field>,
}

/// A cleaned map layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerBlock {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stac_col: Option<String>,
    pub stac_api_endpoint: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub initial_datetime: String,
    pub zoom_extent: [u32; 2],
    pub compare: CompareBlock,
    pub info: LayerInfo,
    pub media: LayerMedia,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_params: Option<SourceParams>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legend: Option<Legend>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<Projection>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareBlock {
    pub dataset_id: String,
    pub layer_id: String,
    pub map_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerInfo {
    pub source: Field,
    pub spatial_extent: Field,
    pub temporal_resolution: Field,
    pub unit: Field,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayerMedia {
    pub src: String,
    pub alt: String,
}

/// Tile server parameters. Keys keep the tiler's snake_case names.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SourceParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colormap_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resampling: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rescale: Option<[f64; 2]>,
}

impl SourceParams {
    pub fn is_empty(&self) -> bool {
        self.colormap_name.is_none() && self.resampling.is_none() && self.rescale.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Legend {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<LegendUnit>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub legend_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stops: Option<Vec<String>>,
}

impl Legend {
    pub fn is_empty(&self) -> bool {
        self.unit.is_none()
            && self.legend_type.is_none()
            && self.min.is_none()
            && self.max.is_none()
            && self.stops.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendUnit {
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    pub id: String,
}
