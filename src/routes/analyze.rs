use actix_web::{web, HttpResponse, Result as ActixResult};
use validator::Validate;

use crate::database::Database;
use crate::errors::AppError;
use crate::models::{AnalysisParameters, FeatureCollection};

/// Solar site suitability analysis.
#[utoipa::path(
    post,
    path = "/api/analyze",
    tag = "Analysis",
    summary = "Find candidate solar sites",
    description = "Filters candidate parcels by minimum area, cuts out buffered residential zones \
        (and, optionally, woodland, parks, water and nature reserves), keeps parcels within reach \
        of grid infrastructure and returns them as a GeoJSON FeatureCollection in EPSG:4326.\n\n\
        Feature `id`s rank parcels by original area and are only stable within one response.",
    request_body = AnalysisParameters,
    responses(
        (status = 200, description = "Candidate sites", body = FeatureCollection),
        (status = 422, description = "Parameters out of range"),
        (status = 500, description = "Query failed (missing tables, PostGIS not installed, bad geometries)"),
        (status = 503, description = "Database unreachable")
    )
)]
pub(crate) async fn analyze(
    db: web::Data<Database>,
    body: web::Json<AnalysisParameters>,
) -> ActixResult<HttpResponse> {
    let params = body.into_inner();
    params
        .validate()
        .map_err(|e| AppError::Validation(format!("Validation failed: {e}")))?;

    db.ensure_connected().await?;
    let sites = db.analyze_sites(&params).await?;

    Ok(HttpResponse::Ok().json(sites))
}
