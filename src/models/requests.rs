use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

/// Body of `POST /api/analyze`. Missing fields take their defaults.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct AnalysisParameters {
    /// Buffer around residential zones, in meters.
    #[serde(default = "default_buffer_distance")]
    #[validate(range(min = 0, max = 2000, message = "buffer_distance must be between 0 and 2000 meters"))]
    #[schema(minimum = 0, maximum = 2000, default = 500, example = 500)]
    pub buffer_distance: i32,

    /// Also exclude woodland, parks, water and nature reserves.
    #[serde(default = "default_exclude_nature")]
    #[schema(default = true)]
    pub exclude_nature: bool,

    /// Minimum original parcel area, in hectares.
    #[serde(default = "default_min_area")]
    #[validate(custom(function = "crate::models::requests::validate_min_area"))]
    #[schema(minimum = 0.1, default = 2.0, example = 2.0)]
    pub min_area: f64,

    /// Maximum distance to the nearest grid infrastructure, in meters.
    #[serde(default = "default_max_grid_distance")]
    #[validate(range(min = 100, max = 10000, message = "max_grid_distance must be between 100 and 10000 meters"))]
    #[schema(minimum = 100, maximum = 10000, default = 2000, example = 2000)]
    pub max_grid_distance: i32,
}

impl Default for AnalysisParameters {
    fn default() -> Self {
        Self {
            buffer_distance: default_buffer_distance(),
            exclude_nature: default_exclude_nature(),
            min_area: default_min_area(),
            max_grid_distance: default_max_grid_distance(),
        }
    }
}

pub const MIN_AREA_HA: f64 = 0.1;

pub fn validate_min_area(min_area: f64) -> Result<(), validator::ValidationError> {
    if !min_area.is_finite() || min_area < MIN_AREA_HA {
        let mut err = validator::ValidationError::new("min_area");
        err.message = Some("min_area must be a number of hectares >= 0.1".into());
        return Err(err);
    }
    Ok(())
}

fn default_buffer_distance() -> i32 {
    500
}

fn default_exclude_nature() -> bool {
    true
}

fn default_min_area() -> f64 {
    2.0
}

fn default_max_grid_distance() -> i32 {
    2000
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> AnalysisParameters {
        serde_json::from_str(body).unwrap()
    }

    #[test]
    fn empty_body_uses_defaults() {
        let params = parse("{}");
        assert_eq!(params.buffer_distance, 500);
        assert!(params.exclude_nature);
        assert_eq!(params.min_area, 2.0);
        assert_eq!(params.max_grid_distance, 2000);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn bounds_are_inclusive() {
        let low = parse(r#"{"buffer_distance":0,"min_area":0.1,"max_grid_distance":100}"#);
        assert!(low.validate().is_ok());
        let high = parse(r#"{"buffer_distance":2000,"max_grid_distance":10000}"#);
        assert!(high.validate().is_ok());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        for body in [
            r#"{"buffer_distance":-1}"#,
            r#"{"buffer_distance":2001}"#,
            r#"{"max_grid_distance":99}"#,
            r#"{"max_grid_distance":10001}"#,
            r#"{"min_area":0.05}"#,
            r#"{"min_area":-3}"#,
        ] {
            assert!(parse(body).validate().is_err(), "{body} should be rejected");
        }
    }

    #[test]
    fn min_area_check_takes_hectares_by_value() {
        assert!(validate_min_area(MIN_AREA_HA).is_ok());
        assert!(validate_min_area(25.0).is_ok());
        assert!(validate_min_area(0.09).is_err());
        assert!(validate_min_area(f64::NAN).is_err());
        assert!(validate_min_area(f64::INFINITY).is_err());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let params = parse(r#"{"exclude_nature":false,"colour":"green"}"#);
        assert!(!params.exclude_nature);
    }

    #[test]
    fn wrong_types_fail_to_parse() {
        assert!(serde_json::from_str::<AnalysisParameters>(r#"{"buffer_distance":"far"}"#).is_err());
        assert!(serde_json::from_str::<AnalysisParameters>(r#"{"exclude_nature":"yes"}"#).is_err());
    }
}
