use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use std::fmt;

/// Everything a handler can fail with. The database layer only produces
/// `Connection` and `Query`; driver errors never leave it.
#[derive(Debug)]
pub(crate) enum AppError {
    Validation(String),
    /// Database unreachable or the connection dropped. Retrying later may help.
    Connection(String),
    /// Database reachable but the query failed for a structural or data reason.
    Query(String),
}

impl AppError {
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::Connection(msg) | Self::Query(msg) => msg,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "validation error: {msg}"),
            Self::Connection(msg) => write!(f, "database connection error: {msg}"),
            Self::Query(msg) => write!(f, "database query error: {msg}"),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Query(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            detail: self.message(),
        })
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    detail: &'a str,
}
