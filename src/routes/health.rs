use actix_web::{web, HttpResponse, Result as ActixResult};

use crate::database::Database;
use crate::errors::AppError;
use crate::models::HealthPayload;

#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses(
        (status = 200, description = "Database answers queries", body = HealthPayload),
        (status = 503, description = "Database unreachable")
    )
)]
pub(crate) async fn health(db: web::Data<Database>) -> ActixResult<HttpResponse> {
    db.ensure_connected().await?;
    if !db.health_check().await? {
        return Err(AppError::Connection("Database unavailable.".into()).into());
    }

    Ok(HttpResponse::Ok().json(HealthPayload {
        status: "ok".to_string(),
    }))
}
