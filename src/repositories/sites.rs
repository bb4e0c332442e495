use crate::errors::AppError;
use crate::models::{AnalysisParameters, Feature, SiteProperties};
use deadpool_postgres::Object;
use tokio_postgres::Row;

/// Analysis-ready tables populated by `prepare_data.sql`.
pub const REQUIRED_TABLES: [&str; 3] = ["candidate_parcels", "exclusion_zones", "grid_infrastructure"];

pub const NATURE_CATEGORIES: [&str; 4] = ["woodland", "park", "water", "nature_reserve"];
pub const PROTECTED_AREA_CATEGORY: &str = "protected_area";

/// Parcels are ranked before exclusions are cut so `id` and `area_ha` describe
/// the original parcel. Geometry work happens in EPSG:25832 (meters); output is 4326.
const ANALYSIS_SQL: &str = r#"
    WITH parcels AS (
        SELECT
            ROW_NUMBER() OVER (ORDER BY area_ha DESC, landuse) AS id,
            area_ha,
            landuse,
            geom
        FROM candidate_parcels
        WHERE area_ha >= $1::float8
          AND geom IS NOT NULL
          AND NOT ST_IsEmpty(geom)
    ),
    exclusions AS (
        SELECT
            ST_UnaryUnion(
                ST_Collect(
                    CASE
                        WHEN category = 'residential' THEN ST_Buffer(geom, $2::float8)
                        WHEN $3::boolean AND category = ANY($5::text[]) THEN geom
                        ELSE NULL
                    END
                )
            ) AS geom
        FROM exclusion_zones
        WHERE category = 'residential'
           OR ($3::boolean AND category = ANY($5::text[]))
    ),
    parcels_cut AS (
        SELECT
            p.id,
            p.area_ha,
            p.landuse,
            CASE
                WHEN e.geom IS NULL THEN p.geom
                WHEN NOT ST_Intersects(p.geom, e.geom) THEN p.geom
                ELSE ST_Difference(p.geom, e.geom)
            END AS geom
        FROM parcels p
        CROSS JOIN exclusions e
    ),
    cleaned AS (
        SELECT
            id,
            area_ha,
            landuse,
            ST_Multi(
                ST_CollectionExtract(ST_MakeValid(geom), 3)
            )::geometry(MultiPolygon, 25832) AS geom
        FROM parcels_cut
        WHERE geom IS NOT NULL AND NOT ST_IsEmpty(geom)
    ),
    near_grid AS (
        SELECT c.id, c.area_ha, c.landuse, c.geom
        FROM cleaned c
        WHERE NOT ST_IsEmpty(c.geom)
          AND EXISTS (
              SELECT 1
              FROM grid_infrastructure g
              WHERE ST_DWithin(c.geom, g.geom, $4::float8)
          )
    ),
    projected AS (
        SELECT id, area_ha, landuse, ST_Transform(geom, 4326) AS geom
        FROM near_grid
    )
    SELECT
        id,
        area_ha::float8 AS area_ha,
        landuse,
        ST_AsGeoJSON(geom) AS geometry
    FROM projected
    WHERE NOT ST_IsEmpty(geom)
    ORDER BY id
"#;

const MISSING_TABLES_SQL: &str = r#"
    SELECT table_name
    FROM unnest($1::text[]) AS required(table_name)
    WHERE to_regclass('public.' || table_name) IS NULL
    ORDER BY table_name
"#;

pub(crate) struct SiteRepository;

impl SiteRepository {
    /// Names of the required tables that don't exist in the `public` schema.
    pub async fn missing_tables(client: &Object) -> Result<Vec<String>, tokio_postgres::Error> {
        let required: Vec<&str> = REQUIRED_TABLES.to_vec();
        let rows = client.query(MISSING_TABLES_SQL, &[&required]).await?;
        rows.iter().map(|row| row.try_get(0)).collect()
    }

    pub async fn analyze(
        client: &Object,
        params: &AnalysisParameters,
        nature_categories: &[String],
    ) -> Result<Vec<Row>, tokio_postgres::Error> {
        let min_area = params.min_area;
        let buffer_distance = f64::from(params.buffer_distance);
        let max_grid_distance = f64::from(params.max_grid_distance);
        let stmt = client.prepare_cached(ANALYSIS_SQL).await?;
        client
            .query(
                &stmt,
                &[
                    &min_area,
                    &buffer_distance,
                    &params.exclude_nature,
                    &max_grid_distance,
                    &nature_categories,
                ],
            )
            .await
    }

    pub fn feature_from_row(row: &Row) -> Result<Feature, AppError> {
        let unexpected =
            |err: tokio_postgres::Error| AppError::Query(format!("Unexpected analysis result row: {err}"));
        build_feature(
            row.try_get("id").map_err(unexpected)?,
            row.try_get("area_ha").map_err(unexpected)?,
            row.try_get("landuse").map_err(unexpected)?,
            row.try_get("geometry").map_err(unexpected)?,
        )
    }
}

/// Nature categories excluded when `exclude_nature` is set.
pub fn nature_categories(include_protected_areas: bool) -> Vec<String> {
    let mut categories: Vec<String> = NATURE_CATEGORIES.iter().map(|c| c.to_string()).collect();
    if include_protected_areas {
        categories.push(PROTECTED_AREA_CATEGORY.to_string());
    }
    categories
}

pub(crate) fn build_feature(
    id: i64,
    area_ha: f64,
    landuse: Option<String>,
    geometry: &str,
) -> Result<Feature, AppError> {
    let geometry: geojson::Geometry = serde_json::from_str(geometry).map_err(|err| {
        AppError::Query(format!("Spatial analysis returned invalid GeoJSON for site {id}: {err}"))
    })?;
    Ok(Feature::new(geometry, SiteProperties { id, area_ha, landuse }))
}
