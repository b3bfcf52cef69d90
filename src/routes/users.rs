use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreatedUserResponse, LoginRequest, RegisterRequest, StatusResponse};
use crate::routes::{error_response, store_error_response, AppState};
use crate::services::parse_id;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/users/{user_id}", web::get().to(get_user))
        .route("/users/{user_id}", web::put().to(update_user));
}

/// Register a new user
///
/// POST /register
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for register request: field_errors={:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    let user = req.into_inner().into_user(Uuid::new_v4());

    match state.store.insert_user(user).await {
        Ok(user_id) => {
            tracing::info!("Registered user {}", user_id);
            HttpResponse::Ok().json(CreatedUserResponse { user_id })
        }
        Err(e) => store_error_response("Failed to register user", &e),
    }
}

/// Look up a user by email
///
/// POST /login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.store.find_user_by_email(&req.email).await {
        Ok(user) => {
            tracing::info!("Login for user {}", user.id);
            HttpResponse::Ok().json(user)
        }
        Err(e) => store_error_response("Login failed", &e),
    }
}

/// GET /users/{user_id}
async fn get_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return store_error_response("Invalid user id", &e),
    };

    match state.store.get_user(id).await {
        Ok(user) => HttpResponse::Ok().json(user),
        Err(e) => store_error_response("Failed to fetch user", &e),
    }
}

/// Replace a user's profile
///
/// PUT /users/{user_id}
async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<String>,
    req: web::Json<RegisterRequest>,
) -> impl Responder {
    let id = match parse_id(&path) {
        Ok(id) => id,
        Err(e) => return store_error_response("Invalid user id", &e),
    };

    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors);
    }

    match state.store.update_user(req.into_inner().into_user(id)).await {
        Ok(()) => {
            tracing::debug!("Updated user {}", id);
            HttpResponse::Ok().json(StatusResponse { status: "ok".to_string() })
        }
        Err(e) => store_error_response("Failed to update user", &e),
    }
}
