pub(crate) mod analyze;
pub(crate) mod health;

use actix_web::{error, web, HttpRequest};

use crate::config::API_PREFIX;
use crate::errors::AppError;

pub(crate) fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/health", web::get().to(health::health))
        .service(web::scope(API_PREFIX).route("/analyze", web::post().to(analyze::analyze)));
}

/// Malformed bodies get the same `{"detail": ...}` shape as range violations.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err: error::JsonPayloadError, _req: &HttpRequest| {
        AppError::Validation(format!("Invalid request body: {err}")).into()
    })
}
