use actix_web::{http::StatusCode, web, HttpResponse, Responder};

use crate::core::RecommendError;
use crate::models::{RecommendationsQuery, RecommendationsResponse};
use crate::routes::{error_response, store_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/recommendations", web::get().to(recommendations));
}

/// Ranked internships for a user
///
/// GET /recommendations?user_id={id}&top_n={n}
///
/// Response body:
/// ```json
/// { "recommendations": [{ "internship_id": "...", "title": "...", "match": 87.5 }] }
/// ```
async fn recommendations(
    state: web::Data<AppState>,
    query: web::Query<RecommendationsQuery>,
) -> impl Responder {
    let top_n = query.top_n.unwrap_or(state.default_top_n);

    tracing::info!("Building recommendations for user: {}, top_n: {}", query.user_id, top_n);

    match state
        .matcher
        .recommend(state.store.as_ref(), &query.user_id, top_n)
        .await
    {
        Ok(result) => {
            tracing::info!(
                "Returning {} recommendations for user {} (from {} internships)",
                result.recommendations.len(),
                query.user_id,
                result.total_candidates
            );

            HttpResponse::Ok().json(RecommendationsResponse {
                recommendations: result.recommendations,
            })
        }
        Err(RecommendError::InvalidArgument(message)) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid argument", message)
        }
        Err(RecommendError::Store(e)) => {
            store_error_response("Failed to build recommendations", &e)
        }
    }
}
