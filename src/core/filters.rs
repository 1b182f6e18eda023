use crate::models::{Candidate, RatingProfile, RecommendationPolicy};
use std::collections::BTreeSet;

/// Check if a corpus entry may be compared against the subject
#[inline]
pub fn is_eligible_neighbor(candidate_id: &str, exclude_ids: &BTreeSet<String>) -> bool {
    !exclude_ids.contains(candidate_id)
}

/// Movies the neighbor rated that the subject has not seen
///
/// Ratings below `policy.min_rating` are dropped when a threshold is set.
/// Output keeps the neighbor profile's iteration order.
pub fn unseen_candidates(
    neighbor: &RatingProfile,
    subject: &RatingProfile,
    policy: &RecommendationPolicy,
) -> Vec<Candidate> {
    neighbor
        .iter()
        .filter(|(movie_id, _)| !subject.contains_key(*movie_id))
        .filter(|(_, rating)| meets_threshold(**rating, policy.min_rating))
        .map(|(movie_id, rating)| Candidate {
            movie_id: movie_id.clone(),
            rating: *rating,
        })
        .collect()
}

#[inline]
fn meets_threshold(rating: f64, min_rating: Option<f64>) -> bool {
    min_rating.map_or(true, |min| rating >= min)
}
