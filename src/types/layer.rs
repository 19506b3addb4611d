//! Raw per-layer fields as extracted from the `layers` cell.

use super::field::Field;

/// One map layer's worth of extracted values.
///
/// Every field is extracted independently from the whole cell, then
/// matched to a layer by occurrence index. A field whose occurrence list is
/// shorter than the list of layer names is `Missing` for the trailing layers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerRecord {
    pub name: Field,
    pub stac_col: Field,
    pub id: Field,
    pub description: Field,
    pub units: Field,
    pub color_ramp_description: Field,
    /// Raw colour tokens from the layer's `[...]` group, if it had one.
    pub color_stops: Option<Vec<String>>,
    pub data_format: Field,
    pub projection: Field,
    pub legend_minimum: Field,
    pub legend_maximum: Field,
    pub legend_type: Field,
    pub colormap_name: Field,
    pub resampling: Field,
    pub rescale_min: Field,
    pub rescale_max: Field,
}

impl LayerRecord {
    /// A layer with only a name, for building records by hand.
    pub fn named(name: &str) -> Self {
        Self {
            name: Field::from_raw(name),
            ..Default::default()
        }
    }
}
