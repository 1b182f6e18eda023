use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

use crate::models::ErrorResponse;

/// Errors reported to API callers
#[derive(Debug, Error)]
pub enum RecommendError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
}

impl ResponseError for RecommendError {
    fn status_code(&self) -> StatusCode {
        match self {
            RecommendError::InvalidRequest(_) | RecommendError::InvalidJson(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
