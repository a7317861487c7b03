use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;
use validator::Validate;

use crate::core::Matcher;
use crate::models::{ErrorResponse, HealthResponse, MatchRequest, MatchResponse};
use crate::services::{ReasonGenerator, RetrievalClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub retrieval: Arc<RetrievalClient>,
    pub reasoner: Arc<ReasonGenerator>,
    pub matcher: Matcher,
}

/// Configure all match-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check))
        .route("/match/find", web::post().to(find_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Find matches endpoint
///
/// POST /api/v1/match/find
///
/// Request body carries the user profile, the user objective and the
/// candidate list; the response is the ranked candidate list with blended
/// scores, matched signals and generated reasons.
async fn find_matches(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    // Validate request
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let request_id = uuid::Uuid::new_v4();
    let MatchRequest {
        user_profile,
        user_objective,
        network_profiles,
    } = req.into_inner();

    tracing::info!(
        "[{}] Matching {} candidates for person {}",
        request_id,
        network_profiles.len(),
        user_objective.person_id
    );

    if network_profiles.is_empty() {
        return HttpResponse::Ok().json(MatchResponse {
            matches: vec![],
            total_candidates: 0,
        });
    }

    // Similarity scores from the retrieval service. On failure the request
    // proceeds with an empty map: candidates score on structure alone.
    let similarity = match state
        .retrieval
        .similarity_scores(&user_profile, &user_objective, &network_profiles)
        .await
    {
        Ok(scores) => scores,
        Err(e) => {
            tracing::warn!(
                "[{}] Retrieval service unavailable, scoring on structure alone: {}",
                request_id,
                e
            );
            Default::default()
        }
    };

    // Run the matching pipeline
    match state
        .matcher
        .run(
            user_profile,
            user_objective,
            network_profiles,
            similarity,
            Arc::clone(&state.reasoner),
        )
        .await
    {
        Ok(result) => {
            tracing::info!(
                "[{}] Returning {} matches (from {} candidates)",
                request_id,
                result.matches.len(),
                result.total_candidates
            );
            HttpResponse::Ok().json(MatchResponse {
                matches: result.matches,
                total_candidates: result.total_candidates,
            })
        }
        Err(e) => {
            tracing::error!("[{}] Matching pipeline error: {}", request_id, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Matching failed".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}
