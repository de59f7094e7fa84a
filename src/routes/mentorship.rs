use actix_web::{http::header, web, HttpRequest, HttpResponse, Responder};
use validator::Validate;

use crate::auth::TokenVerifier;
use crate::models::{ErrorResponse, HealthResponse, RecommendMentorsQuery, RecommendMentorsResponse};
use crate::services::{MentorRecommender, RecommendError};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: MentorRecommender,
    pub verifier: TokenVerifier,
    pub default_limit: usize,
}

/// Configure all mentorship routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/mentorship/recommendations", web::get().to(recommend_mentors));
}

fn error_response(status_code: u16, error: &str, message: String) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message,
        status_code,
    }
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.recommender.repository().health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::warn!("Repository health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Recommend mentors for the authenticated mentee
///
/// GET /api/v1/mentorship/recommendations?limit=5
///
/// Response body:
/// ```json
/// { "recommended_mentors": [ { "id": 7, "similarityScore": 8.5, ... } ] }
/// ```
async fn recommend_mentors(
    state: web::Data<AppState>,
    query: web::Query<RecommendMentorsQuery>,
    http_req: HttpRequest,
) -> impl Responder {
    let auth_header = http_req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let mentee_id = match state.verifier.verify_header(auth_header) {
        Ok(id) => id,
        Err(e) => {
            tracing::info!("Rejected recommendation request on {}: {}", http_req.path(), e);
            return HttpResponse::Unauthorized().json(error_response(
                401,
                "Unauthorized",
                e.to_string(),
            ));
        }
    };

    if let Err(errors) = query.validate() {
        tracing::info!("Validation failed for recommendation request: {:?}", errors);
        return HttpResponse::BadRequest().json(error_response(
            400,
            "Validation failed",
            errors.to_string(),
        ));
    }

    let limit = query.effective_limit(state.default_limit);

    tracing::info!("Recommending mentors for mentee: {}, limit: {}", mentee_id, limit);

    match state.recommender.recommend_mentors(mentee_id, limit).await {
        Ok(recommended_mentors) => {
            tracing::info!(
                "Returning {} mentors for mentee {}",
                recommended_mentors.len(),
                mentee_id
            );
            HttpResponse::Ok().json(RecommendMentorsResponse { recommended_mentors })
        }
        Err(e @ RecommendError::MenteeNotFound(_)) => {
            HttpResponse::NotFound().json(error_response(404, "Mentee not found", e.to_string()))
        }
        Err(e @ RecommendError::NotMentee(_)) => {
            HttpResponse::BadRequest().json(error_response(400, "Not a mentee", e.to_string()))
        }
        Err(e @ RecommendError::Repository(_)) => {
            tracing::error!("Failed to recommend mentors for {}: {}", mentee_id, e);
            HttpResponse::InternalServerError().json(error_response(
                500,
                "Failed to recommend mentors",
                e.to_string(),
            ))
        }
    }
}
