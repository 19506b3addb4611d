//! Static configuration tables consumed by the assembler and renderer.
//!
//! The defaults mirror the dashboard configuration the output is published
//! to. A `docmdx.yaml` manifest may replace any table, and tests substitute
//! reduced tables.

use serde::{Deserialize, Serialize};

const DEFAULT_STAC_API_ENDPOINT: &str = "https://dev.openveda.cloud/api/stac";

const DEFAULT_COLORMAPS: &[&str] = &[
    "accent", "accent_r", "afmhot", "afmhot_r", "autumn", "autumn_r", "binary", "binary_r",
    "blues", "blues_r", "bone", "bone_r", "brbg", "brbg_r", "brg", "brg_r", "bugn", "bugn_r",
    "bupu", "bupu_r", "bwr", "bwr_r", "cfastie", "cividis", "cividis_r", "cmrmap", "cmrmap_r",
    "cool", "cool_r", "coolwarm", "coolwarm_r", "copper", "copper_r", "cubehelix",
    "cubehelix_r", "dark2", "dark2_r", "flag", "flag_r", "gist_earth", "gist_earth_r",
    "gist_gray", "gist_gray_r", "gist_heat", "gist_heat_r", "gist_ncar", "gist_ncar_r",
    "gist_rainbow", "gist_rainbow_r", "gist_stern", "gist_stern_r", "gist_yarg", "gist_yarg_r",
    "gnbu", "gnbu_r", "gnuplot", "gnuplot2", "gnuplot2_r", "gnuplot_r", "gray", "gray_r",
    "greens", "greens_r", "greys", "greys_r", "hot", "hot_r", "hsv", "hsv_r", "inferno",
    "inferno_r", "jet", "jet_r", "magma", "magma_r", "nipy_spectral", "nipy_spectral_r",
    "ocean", "ocean_r", "oranges", "oranges_r", "orrd", "orrd_r", "paired", "paired_r",
    "pastel1", "pastel1_r", "pastel2", "pastel2_r", "pink", "pink_r", "piyg", "piyg_r",
    "plasma", "plasma_r", "prgn", "prgn_r", "prism", "prism_r", "pubu", "pubu_r", "pubugn",
    "pubugn_r", "puor", "puor_r", "purd", "purd_r", "purples", "purples_r", "rainbow",
    "rainbow_r", "rdbu", "rdbu_r", "rdgy", "rdgy_r", "rdpu", "rdpu_r", "rdylbu", "rdylbu_r",
    "rdylgn", "rdylgn_r", "reds", "reds_r", "rplumbo", "schwarzwald", "seismic", "seismic_r",
    "set1", "set1_r", "set2", "set2_r", "set3", "set3_r", "spectral", "spectral_r", "spring",
    "spring_r", "summer", "summer_r", "tab10", "tab10_r", "tab20", "tab20_r", "tab20b",
    "tab20b_r", "tab20c", "tab20c_r", "terrain", "terrain_r", "twilight", "twilight_r",
    "twilight_shifted", "twilight_shifted_r", "viridis", "viridis_r", "winter", "winter_r",
    "wistia", "wistia_r", "ylgn", "ylgn_r", "ylgnbu", "ylgnbu_r", "ylorbr", "ylorbr_r",
    "ylorrd", "ylorrd_r",
];

const DEFAULT_PROJECTIONS: &[&str] = &[
    "albers",
    "equalEarth",
    "equirectangular",
    "lambertConformalConic",
    "mercator",
    "naturalEarth",
    "winkelTripel",
    "globe",
    "polarNorth",
    "polarSouth",
];

const DEFAULT_PROSE_TOP: &[&str] = &[
    "Introduction paragraph",
    "Source Data Product Citation",
    "Version History",
    "Scientific Details",
];

const DEFAULT_PROSE_BOTTOM: &[&str] = &["Disclaimer", "Limitations of Use", "License"];

const DEFAULT_UNTITLED: &[&str] = &["Introduction paragraph"];

/// Closed enumerations and fixed orderings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    /// Accepted `Colormap name` values (exact, case-sensitive).
    pub colormaps: Vec<String>,
    /// Accepted `Projection` values (exact, case-sensitive).
    pub projections: Vec<String>,
    /// Prose sections rendered first, in this order.
    pub prose_top: Vec<String>,
    /// Prose sections rendered last, in this order.
    pub prose_bottom: Vec<String>,
    /// Sections rendered without a `##` heading line.
    pub untitled_sections: Vec<String>,
    /// STAC API written into every layer.
    pub stac_api_endpoint: String,
}

fn owned(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

impl Default for Schema {
    fn default() -> Self {
        Self {
            colormaps: owned(DEFAULT_COLORMAPS),
            projections: owned(DEFAULT_PROJECTIONS),
            prose_top: owned(DEFAULT_PROSE_TOP),
            prose_bottom: owned(DEFAULT_PROSE_BOTTOM),
            untitled_sections: owned(DEFAULT_UNTITLED),
            stac_api_endpoint: DEFAULT_STAC_API_ENDPOINT.to_string(),
        }
    }
}

impl Schema {
    pub fn is_untitled(&self, header: &str) -> bool {
        self.untitled_sections.iter().any(|h| h == header)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables() {
        let schema = Schema::default();
        assert!(schema.colormaps.iter().any(|c| c == "viridis"));
        assert!(!schema.colormaps.iter().any(|c| c == "Viridis"));
        assert_eq!(schema.projections.len(), 10);
        assert_eq!(schema.prose_top[0], "Introduction paragraph");
        assert_eq!(schema.prose_bottom.last().unwrap(), "License");
    }

    #[test]
    fn test_partial_override() {
        let schema: Schema = serde_yaml::from_str("projections: [mercator]").unwrap();
        assert_eq!(schema.projections, vec!["mercator"]);
        assert_eq!(schema.colormaps.len(), DEFAULT_COLORMAPS.len());
        assert!(schema.is_untitled("Introduction paragraph"));
    }
}
