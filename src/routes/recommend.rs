use actix_web::{web, HttpResponse, Responder};
use std::sync::Arc;

use crate::core::Recommender;
use crate::error::RecommendError;
use crate::models::{RecommendRequest, RecommendResponse, Resolved};
use crate::services::{MatchLog, MatchLogEntry};

pub const GREETING: &str = "Hello from the movie recommender!";

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub recommender: Recommender,
    pub match_log: Arc<MatchLog>,
}

impl AppState {
    pub fn new(recommender: Recommender, match_log: MatchLog) -> Self {
        Self {
            recommender,
            match_log: Arc::new(match_log),
        }
    }
}

/// Configure recommendation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/test", web::get().to(health_check))
        .route("/recommend", web::post().to(recommend));
}

/// Health check endpoint
///
/// GET /api/test
async fn health_check() -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body(GREETING)
}

/// Recommend endpoint
///
/// POST /api/recommend
///
/// Request body:
/// ```json
/// {
///   "user_id": "string" | ["string"],
///   "user_ratings": {"userId": {"movieId": 5}} | {"movieId": 5},
///   "all_user_ratings": {"userId": {"movieId": 5}}
/// }
/// ```
async fn recommend(
    state: web::Data<AppState>,
    req: web::Json<RecommendRequest>,
) -> Result<HttpResponse, RecommendError> {
    let query = match req.into_inner().resolve() {
        Ok(Resolved::Query(query)) => query,
        Ok(Resolved::Empty) => {
            tracing::info!("No requester ratings supplied, returning empty recommendations");
            return Ok(HttpResponse::Ok().json(RecommendResponse::empty()));
        }
        Err(e) => {
            tracing::info!("Invalid recommend request: {}", e);
            return Err(e);
        }
    };

    tracing::debug!(
        "Matching {} rated movies against {} users (excluding {})",
        query.subject.len(),
        query.corpus.len(),
        query.exclude_ids.len()
    );

    let Some(result) = state
        .recommender
        .recommend(&query.subject, &query.exclude_ids, &query.corpus)
    else {
        tracing::info!("No similar users found for {:?}", query.requester_ids);
        return Ok(HttpResponse::Ok().json(RecommendResponse::no_match()));
    };

    tracing::info!(
        "Returning {} recommendations for {:?} via {} (similarity {:.4})",
        result.recommendations.len(),
        query.requester_ids,
        result.neighbor_id,
        result.similarity
    );

    // Fire and forget; the response never waits on the log file
    let match_log = Arc::clone(&state.match_log);
    let entry = MatchLogEntry::new(query.requester_ids, &result);
    actix_web::rt::spawn(async move {
        match_log.record(&entry).await;
    });

    Ok(HttpResponse::Ok().json(RecommendResponse::from(result)))
}
