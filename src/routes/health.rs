use actix_web::{web, HttpResponse, Responder};

use crate::models::{CorsInfoResponse, HealthResponse};
use crate::routes::AppState;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/_cors", web::get().to(cors_info));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let store_healthy = match state.store.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Record store health check failed: {}", e);
            false
        }
    };

    let status = if store_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Report the active CORS configuration, for debugging deployments
async fn cors_info(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(CorsInfoResponse {
        allowed_origins: state.cors.allowed_origins.clone(),
        allow_credentials: state.cors.allow_credentials(),
    })
}
