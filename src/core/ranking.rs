use crate::models::Candidate;

/// Order candidates by rating (highest first) and return their movie ids
///
/// The sort is stable: equally rated movies keep their incoming order.
/// `max_results` truncates the ranked list when set.
pub fn rank_candidates(mut candidates: Vec<Candidate>, max_results: Option<usize>) -> Vec<String> {
    candidates.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    if let Some(limit) = max_results {
        candidates.truncate(limit);
    }

    candidates.into_iter().map(|c| c.movie_id).collect()
}
