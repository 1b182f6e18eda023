use serde::{Deserialize, Serialize};

use crate::models::domain::MatchResult;

pub const NO_SIMILAR_USERS: &str = "No similar users found";

/// Response for the recommend endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similar_user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub similarity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RecommendResponse {
    /// Nothing to recommend because no requester rated anything
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn no_match() -> Self {
        Self {
            reason: Some(NO_SIMILAR_USERS.to_string()),
            ..Self::default()
        }
    }
}

impl From<MatchResult> for RecommendResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            recommendations: result.recommendations,
            similar_user_id: Some(result.neighbor_id),
            similarity: Some(result.similarity),
            reason: None,
        }
    }
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
