use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// file format of a persisted centrality result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// gzipped CSV with WKT geometries
    #[default]
    Csv,
    /// GeoJSON FeatureCollection of LineString features
    GeoJson,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv.gz",
            OutputFormat::GeoJson => "geojson",
        }
    }
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::GeoJson => write!(f, "geo_json"),
        }
    }
}
