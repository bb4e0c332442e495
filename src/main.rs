mod config;
mod database;
mod errors;
mod models;
mod repositories;
mod routes;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Settings;
use crate::database::{Database, DatabaseOptions};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SolarScout API",
        description = "Finds land parcels suitable for ground-mounted solar farms.\n\n\
            Candidate parcels are filtered by size, cut by buffered residential areas and \
            protected nature, and kept only when grid infrastructure is within reach. \
            All geometry work runs in PostGIS (EPSG:25832); results are GeoJSON in EPSG:4326.",
        version = "0.1.0"
    ),
    paths(routes::health::health, routes::analyze::analyze),
    components(schemas(
        models::AnalysisParameters,
        models::FeatureCollection,
        models::Feature,
        models::SiteProperties,
        models::HealthPayload,
    )),
    tags(
        (name = "System", description = "Health and status"),
        (name = "Analysis", description = "Solar site suitability"),
    )
)]
struct ApiDoc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let env_file = dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();
    if let Some(path) = env_file {
        log::info!("Loaded environment overrides from {}", path.display());
    }

    let settings = Settings::from_env();
    let database = web::Data::new(Database::new(DatabaseOptions::from_settings(&settings)));

    // Keep serving when the database is down so /health can report 503.
    if let Err(err) = database.connect().await {
        log::error!("Initial database connection failed: {err}");
    }

    let bind = format!("{}:{}", settings.host, settings.port);
    log::info!("Starting SolarScout API on {bind}");
    log::info!("Swagger UI: http://{bind}/docs/");

    let allow_any_origin = settings.allows_any_origin();
    if allow_any_origin {
        log::warn!("CORS: any origin allowed, credentials disabled");
    }
    let cors_origins = settings.cors_origins.clone();
    let openapi = ApiDoc::openapi();
    let app_database = database.clone();

    let result = HttpServer::new(move || {
        App::new()
            .wrap(
                Logger::new(r#"%a "%r" %s %b %Dms "%{User-Agent}i""#)
                    .exclude("/health"),
            )
            .wrap(build_cors(allow_any_origin, &cors_origins))
            .app_data(app_database.clone())
            .service(SwaggerUi::new("/docs/{_:.*}").url("/openapi.json", openapi.clone()))
            .configure(routes::configure_routes)
    })
    .bind(&bind)?
    .run()
    .await;

    database.disconnect().await;
    result
}

/// Wildcard means any origin without credentials; otherwise exactly the listed origins, with credentials.
fn build_cors(allow_any_origin: bool, origins: &[String]) -> Cors {
    let cors = Cors::default().allow_any_method().allow_any_header();
    if allow_any_origin {
        return cors.allow_any_origin();
    }
    origins
        .iter()
        .fold(cors.supports_credentials(), |cors, origin| cors.allowed_origin(origin))
}
