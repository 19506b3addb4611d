//! Layer cleaning.
//!
//! Turns a raw [`LayerRecord`] into the published [`LayerBlock`]. Optional
//! blocks are built field by field and only attached when something was
//! filled in. A layer without a usable id is dropped.

use tracing::debug;

use crate::error::Result;
use crate::types::{
    is_placeholder, Colour, ColourMode, CompareBlock, LayerBlock, LayerInfo, LayerMedia,
    LayerRecord, Legend, LegendUnit, Projection, Schema, SourceParams,
};
use crate::validation::{check_colormap, check_projection};

const INITIAL_DATETIME: &str = "newest";
const ZOOM_EXTENT: [u32; 2] = [0, 20];
const PLACEHOLDER_MEDIA_SRC: &str = "::file <INSERT MANUALLY>";
const PLACEHOLDER_MEDIA_ALT: &str = "<INSERT MANUALLY>";
const GRADIENT: &str = "gradient";

const MAP_LABEL: &str = "::js ({ dateFns, datetime, compareDatetime }) => {\n\
return `${dateFns.format(datetime, 'LLL yyyy')} VS ${dateFns.format(compareDatetime, 'LLL yyyy')}`;\n\
}";

/// Values shared by every layer of a dataset.
#[derive(Debug, Clone)]
pub struct LayerContext<'a> {
    pub dataset_id: String,
    pub info: LayerInfo,
    pub schema: &'a Schema,
    pub colour_mode: ColourMode,
}

/// Clean one layer. `Ok(None)` means the layer has no id and is left out.
///
/// Enumerations and colours are checked before the id gate, so an invalid
/// value fails the document even on a layer that would be dropped.
pub fn build_layer(record: &LayerRecord, ctx: &LayerContext<'_>) -> Result<Option<LayerBlock>> {
    let source_params = build_source_params(record, ctx.schema)?;
    let legend = build_legend(record, ctx.colour_mode)?;
    let projection = record
        .projection
        .meaningful()
        .map(|p| check_projection(p, ctx.schema).map(|id| Projection { id }))
        .transpose()?;

    let Some(id) = record.id.meaningful() else {
        debug!(name = %record.name, "dropping layer without id");
        return Ok(None);
    };

    Ok(Some(LayerBlock {
        id: id.to_string(),
        stac_col: owned(record.stac_col.meaningful()),
        stac_api_endpoint: ctx.schema.stac_api_endpoint.clone(),
        name: owned(record.name.meaningful()),
        data_type: owned(record.data_format.meaningful()),
        description: owned(record.description.meaningful()),
        initial_datetime: INITIAL_DATETIME.to_string(),
        zoom_extent: ZOOM_EXTENT,
        compare: CompareBlock {
            dataset_id: ctx.dataset_id.clone(),
            layer_id: id.to_string(),
            map_label: MAP_LABEL.to_string(),
        },
        info: ctx.info.clone(),
        media: LayerMedia {
            src: PLACEHOLDER_MEDIA_SRC.to_string(),
            alt: PLACEHOLDER_MEDIA_ALT.to_string(),
        },
        source_params,
        legend,
        projection,
    }))
}

fn owned(value: Option<&str>) -> Option<String> {
    value.map(str::to_string)
}

/// Tiler parameters. `rescale` needs both bounds.
pub fn build_source_params(record: &LayerRecord, schema: &Schema) -> Result<Option<SourceParams>> {
    let params = SourceParams {
        colormap_name: record
            .colormap_name
            .meaningful()
            .map(|c| check_colormap(c, schema))
            .transpose()?,
        resampling: owned(record.resampling.meaningful()),
        rescale: match (record.rescale_min.to_f64(), record.rescale_max.to_f64()) {
            (Some(min), Some(max)) => Some([min, max]),
            _ => None,
        },
    };

    Ok((!params.is_empty()).then_some(params))
}

/// Legend block. `min` and `max` are only set for gradient legends.
pub fn build_legend(record: &LayerRecord, mode: ColourMode) -> Result<Option<Legend>> {
    let legend_type = owned(record.legend_type.meaningful());
    let is_gradient = legend_type.as_deref() == Some(GRADIENT);

    let legend = Legend {
        unit: record
            .units
            .meaningful()
            .map(|label| LegendUnit {
                label: label.to_string(),
            }),
        min: record.legend_minimum.to_f64().filter(|_| is_gradient),
        max: record.legend_maximum.to_f64().filter(|_| is_gradient),
        legend_type,
        stops: convert_stops(record.color_stops.as_deref().unwrap_or_default(), mode)?,
    };

    Ok((!legend.is_empty()).then_some(legend))
}

/// Convert raw colour tokens; placeholder tokens are skipped, anything else must parse.
pub fn convert_stops(tokens: &[String], mode: ColourMode) -> Result<Option<Vec<String>>> {
    let stops = tokens
        .iter()
        .filter(|t| !is_placeholder(t))
        .map(|t| Colour::parse(t).map(|c| c.format(mode)))
        .collect::<Result<Vec<_>>>()?;

    Ok((!stops.is_empty()).then_some(stops))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DocError;
    use crate::types::Field;
    use pretty_assertions::assert_eq;

    fn context(schema: &Schema) -> LayerContext<'_> {
        LayerContext {
            dataset_id: "sea-ice".to_string(),
            info: LayerInfo {
                source: Field::from_raw("NASA"),
                spatial_extent: Field::Missing,
                temporal_resolution: Field::from_raw("Monthly"),
                unit: Field::Missing,
            },
            schema,
            colour_mode: ColourMode::Rgb,
        }
    }

    fn layer(id: &str) -> LayerRecord {
        let mut record = LayerRecord::named("Ice");
        record.id = Field::from_raw(id);
        record
    }

    #[test]
    fn test_layer_without_id_dropped() {
        let schema = Schema::default();
        let mut record = layer("None");
        record.colormap_name = Field::from_raw("viridis");
        record.units = Field::from_raw("km");

        assert_eq!(build_layer(&record, &context(&schema)).unwrap(), None);
    }

    #[test]
    fn test_dropped_layer_still_validated() {
        let schema = Schema::default();
        let mut record = layer("");
        record.colormap_name = Field::from_raw("not-a-colormap");
        assert!(build_layer(&record, &context(&schema)).is_err());
    }

    #[test]
    fn test_minimal_layer() {
        let schema = Schema::default();
        let block = build_layer(&layer("ice"), &context(&schema)).unwrap().unwrap();

        assert_eq!(block.id, "ice");
        assert_eq!(block.name.as_deref(), Some("Ice"));
        assert_eq!(block.stac_col, None);
        assert_eq!(block.compare.dataset_id, "sea-ice");
        assert_eq!(block.compare.layer_id, "ice");
        assert!(block.compare.map_label.starts_with("::js ({ dateFns"));
        assert_eq!(block.source_params, None);
        assert_eq!(block.legend, None);
        assert_eq!(block.projection, None);
    }

    #[test]
    fn test_legend_min_max_only_for_gradient() {
        let mut record = layer("ice");
        record.legend_type = Field::from_raw("categorical");
        record.legend_minimum = Field::from_raw("5");
        record.legend_maximum = Field::from_raw("10");

        let legend = build_legend(&record, ColourMode::Rgb).unwrap().unwrap();
        assert_eq!(legend.legend_type.as_deref(), Some("categorical"));
        assert_eq!((legend.min, legend.max), (None, None));

        record.legend_type = Field::from_raw("gradient");
        let legend = build_legend(&record, ColourMode::Rgb).unwrap().unwrap();
        assert_eq!((legend.min, legend.max), (Some(5.0), Some(10.0)));

        record.legend_type = Field::from_raw("Gradient");
        let legend = build_legend(&record, ColourMode::Rgb).unwrap().unwrap();
        assert_eq!(legend.min, None);
    }

    #[test]
    fn test_legend_stops_by_mode() {
        let mut record = layer("ice");
        record.color_stops = Some(vec![
            "#FF0000".to_string(),
            "none".to_string(),
            "rgb(0, 0, 255)".to_string(),
        ]);

        let rgb = build_legend(&record, ColourMode::Rgb).unwrap().unwrap();
        assert_eq!(
            rgb.stops,
            Some(vec!["rgb(255,0,0)".to_string(), "rgb(0,0,255)".to_string()])
        );

        let hex = build_legend(&record, ColourMode::Hex).unwrap().unwrap();
        assert_eq!(
            hex.stops,
            Some(vec!["#FF0000".to_string(), "#0000FF".to_string()])
        );
    }

    #[test]
    fn test_bad_colour_stop_is_fatal() {
        let mut record = layer("ice");
        record.color_stops = Some(vec!["blue".to_string()]);
        assert!(matches!(
            build_legend(&record, ColourMode::Rgb),
            Err(DocError::Validation { .. })
        ));
    }

    #[test]
    fn test_placeholder_only_stops_omitted() {
        assert_eq!(
            convert_stops(&["null".to_string()], ColourMode::Hex).unwrap(),
            None
        );
    }

    #[test]
    fn test_source_params() {
        let schema = Schema::default();
        let mut record = layer("ice");
        record.rescale_min = Field::from_raw("0");
        assert_eq!(build_source_params(&record, &schema).unwrap(), None);

        record.rescale_max = Field::from_raw("1.5");
        record.resampling = Field::from_raw("bilinear");
        let params = build_source_params(&record, &schema).unwrap().unwrap();
        assert_eq!(params.rescale, Some([0.0, 1.5]));
        assert_eq!(params.resampling.as_deref(), Some("bilinear"));
        assert_eq!(params.colormap_name, None);
    }

    #[test]
    fn test_colormap_case_sensitive() {
        let schema = Schema::default();
        let mut record = layer("ice");
        record.colormap_name = Field::from_raw("Viridis");

        let err = build_layer(&record, &context(&schema)).unwrap_err();
        assert!(err.to_string().contains("Viridis"));
    }

    #[test]
    fn test_projection_validated() {
        let schema = Schema::default();
        let mut record = layer("ice");
        record.projection = Field::from_raw("polarNorth");
        let block = build_layer(&record, &context(&schema)).unwrap().unwrap();
        assert_eq!(
            block.projection,
            Some(Projection {
                id: "polarNorth".to_string()
            })
        );

        record.projection = Field::from_raw("polarnorth");
        assert!(build_layer(&record, &context(&schema)).is_err());
    }
}
