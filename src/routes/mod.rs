// Route exports
pub mod health;
pub mod internships;
pub mod recommendations;
pub mod users;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use std::sync::Arc;

use crate::config::CorsSettings;
use crate::core::Matcher;
use crate::models::ErrorResponse;
use crate::services::{RecordStore, StoreError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub matcher: Matcher,
    pub default_top_n: i64,
    pub cors: CorsSettings,
}

fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(recommendations::configure)
        .configure(users::configure)
        .configure(internships::configure);
}

/// Mount every route under `/api/v1` and at the root, where the web
/// client expects them
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1").configure(configure))
        .configure(configure);
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl ToString) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.to_string(),
        status_code: status.as_u16(),
    })
}

/// Map a store failure to its HTTP status
pub(crate) fn store_error_response(context: &str, err: &StoreError) -> HttpResponse {
    match err {
        StoreError::InvalidId(_) => error_response(StatusCode::BAD_REQUEST, "Invalid id", err),
        StoreError::NotFound(_) => error_response(StatusCode::NOT_FOUND, "Not found", err),
        StoreError::Conflict(_) => error_response(StatusCode::CONFLICT, "Conflict", err),
        StoreError::SqlxError(_) | StoreError::MigrateError(_) => {
            tracing::error!("{}: {}", context, err);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, context, err)
        }
    }
}

/// JSON error response for JSON payload errors
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST))
            .json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}
