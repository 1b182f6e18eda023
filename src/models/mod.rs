// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Candidate, Corpus, MatchResult, RatingProfile, RecommendationPolicy};
pub use requests::{RecommendQuery, RecommendRequest, RequesterIds, Resolved, UserRatings};
pub use responses::{ErrorResponse, RecommendResponse, NO_SIMILAR_USERS};
