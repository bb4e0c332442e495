use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct HealthPayload {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "FeatureCollection")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self {
            kind: "FeatureCollection",
            features,
        }
    }
}

/// A candidate site after exclusion cuts, in EPSG:4326.
#[derive(Debug, Serialize, ToSchema)]
pub struct Feature {
    #[serde(rename = "type")]
    #[schema(value_type = String, example = "Feature")]
    pub kind: &'static str,
    /// GeoJSON MultiPolygon.
    #[schema(value_type = Object)]
    pub geometry: geojson::Geometry,
    pub properties: SiteProperties,
}

impl Feature {
    pub fn new(geometry: geojson::Geometry, properties: SiteProperties) -> Self {
        Self {
            kind: "Feature",
            geometry,
            properties,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SiteProperties {
    /// Rank by area within this response. Not stable across data changes.
    pub id: i64,
    /// Area of the original parcel, before exclusions were cut out.
    pub area_ha: f64,
    pub landuse: Option<String>,
}
