use std::collections::BTreeMap;

/// Ratings given by one user (or a synthesized group), keyed by movie id
pub type RatingProfile = BTreeMap<String, f64>;

/// Every known user's ratings, keyed by user id
pub type Corpus = BTreeMap<String, RatingProfile>;

/// Best neighbor found for a subject profile
#[derive(Debug, Clone, PartialEq)]
pub struct MatchResult {
    pub neighbor_id: String,
    pub similarity: f64,
    pub recommendations: Vec<String>,
}

/// A movie the neighbor rated that the subject has not seen
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub movie_id: String,
    pub rating: f64,
}

/// Recommendation tuning
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RecommendationPolicy {
    /// Drop neighbor ratings below this value
    pub min_rating: Option<f64>,
    /// Keep at most this many recommendations
    pub max_results: Option<usize>,
}
