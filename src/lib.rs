//! Movie Recommender - nearest-neighbor recommendation service
//!
//! Finds the user whose ratings are most similar (cosine similarity over
//! co-rated movies) to a requester, or to a group of requesters averaged into
//! one profile, and recommends that neighbor's movies the requester has not
//! seen yet.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use actix_web::{error as actix_error, web, HttpRequest};

// Re-export commonly used types
pub use crate::core::{combine_ratings, Recommender};
pub use error::RecommendError;
pub use models::{Corpus, MatchResult, RatingProfile, RecommendRequest, RecommendResponse, RecommendationPolicy};

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: actix_error::JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    RecommendError::InvalidJson(err.to_string()).into()
}

/// JSON extractor config used by the server and the tests
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(handle_json_payload_error)
}
