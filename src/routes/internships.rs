use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreatedInternshipResponse, InternshipRequest, SeedResponse};
use crate::routes::{error_response, store_error_response, AppState};
use crate::services::parse_id;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/internships", web::post().to(create_internship))
        .route("/internships", web::get().to(list_internships))
        .route("/internships/{internship_id}", web::get().to(get_internship))
        .route("/seed_internships", web::post().to(seed_internships));
}

/// POST /internships
async fn create_internship(
    state: web::Data<AppState>,
    req: web::Json<InternshipRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let internship = req.into_inner().into_internship(Uuid::new_v4());

    match state.store.insert_internship(internship).await {
        Ok(internship_id) => HttpResponse::Ok().json(CreatedInternshipResponse { internship_id }),
        Err(e) => store_error_response("Failed to create internship", &e),
    }
}

/// GET /internships
async fn list_internships(state: web::Data<AppState>) -> impl Responder {
    match state.store.list_internships().await {
        Ok(internships) => HttpResponse::Ok().json(internships),
        Err(e) => store_error_response("Failed to list internships", &e),
    }
}

/// GET /internships/{internship_id}
async fn get_internship(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return store_error_response("Invalid internship id", &e),
    };

    match state.store.get_internship(id).await {
        Ok(internship) => HttpResponse::Ok().json(internship),
        Err(e) => store_error_response("Failed to fetch internship", &e),
    }
}

/// Bulk insert internships, e.g. from a seed file
///
/// POST /seed_internships
async fn seed_internships(
    state: web::Data<AppState>,
    req: web::Json<Vec<InternshipRequest>>,
) -> impl Responder {
    if req.is_empty() {
        return HttpResponse::Ok().json(SeedResponse { inserted: 0 });
    }

    for (index, item) in req.iter().enumerate() {
        if let Err(errors) = item.validate() {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Validation failed",
                format!("item {}: {}", index, errors),
            );
        }
    }

    let internships = req
        .into_inner()
        .into_iter()
        .map(|item| item.into_internship(Uuid::new_v4()))
        .collect();

    match state.store.insert_internships(internships).await {
        Ok(inserted) => HttpResponse::Ok().json(SeedResponse { inserted }),
        Err(e) => store_error_response("Failed to seed internships", &e),
    }
}
