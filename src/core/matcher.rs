use std::collections::BTreeSet;

use crate::core::{
    filters::{is_eligible_neighbor, unseen_candidates},
    ranking::rank_candidates,
    similarity::profile_similarity,
};
use crate::models::{Corpus, MatchResult, RatingProfile, RecommendationPolicy};

/// Nearest-neighbor recommender
///
/// # Pipeline Stages
/// 1. Drop excluded users (the requesters themselves)
/// 2. Cosine similarity over co-rated movies for every remaining user
/// 3. Pick the single most similar neighbor
/// 4. Filter and rank the neighbor's unseen movies
///
/// Holds configuration only; every call is independent.
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    policy: RecommendationPolicy,
}

impl Recommender {
    pub fn new(policy: RecommendationPolicy) -> Self {
        Self { policy }
    }

    /// Find the corpus user most similar to `subject`
    ///
    /// Users in `exclude_ids`, users sharing no movie with the subject, and
    /// users whose shared ratings give a zero-magnitude vector are skipped.
    /// On equal similarity the first user in corpus order (ascending id) wins.
    ///
    /// # Returns
    /// `(user_id, similarity)` of the best neighbor, or `None` when nobody qualifies
    pub fn find_neighbor<'c>(
        &self,
        subject: &RatingProfile,
        exclude_ids: &BTreeSet<String>,
        corpus: &'c Corpus,
    ) -> Option<(&'c str, f64)> {
        let mut best: Option<(&'c str, f64)> = None;

        for (candidate_id, profile) in corpus {
            if !is_eligible_neighbor(candidate_id, exclude_ids) {
                continue;
            }

            let Some(similarity) = profile_similarity(subject, profile) else {
                continue;
            };

            match best {
                Some((_, best_similarity)) if similarity <= best_similarity => {}
                _ => best = Some((candidate_id.as_str(), similarity)),
            }
        }

        best
    }

    /// Recommend movies from the nearest neighbor's ratings
    ///
    /// # Arguments
    /// * `subject` - Ratings of the requester (or the averaged group)
    /// * `exclude_ids` - Users that must never be picked as the neighbor
    /// * `corpus` - All users' ratings
    ///
    /// # Returns
    /// The neighbor, its similarity and the ranked unseen movies, or `None`
    /// when no similar user exists
    pub fn recommend(
        &self,
        subject: &RatingProfile,
        exclude_ids: &BTreeSet<String>,
        corpus: &Corpus,
    ) -> Option<MatchResult> {
        let (neighbor_id, similarity) = self.find_neighbor(subject, exclude_ids, corpus)?;
        let neighbor = corpus.get(neighbor_id)?;

        let candidates = unseen_candidates(neighbor, subject, &self.policy);
        tracing::debug!(
            "Neighbor {} (similarity {:.4}) has {} unseen candidates",
            neighbor_id,
            similarity,
            candidates.len()
        );

        Some(MatchResult {
            neighbor_id: neighbor_id.to_string(),
            similarity,
            recommendations: rank_candidates(candidates, self.policy.max_results),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(pairs: &[(&str, f64)]) -> RatingProfile {
        pairs.iter().map(|(m, r)| (m.to_string(), *r)).collect()
    }

    fn corpus(entries: &[(&str, RatingProfile)]) -> Corpus {
        entries
            .iter()
            .map(|(id, p)| (id.to_string(), p.clone()))
            .collect()
    }

    fn ids(list: &[&str]) -> BTreeSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_recommend_basic() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 5.0), ("m2", 3.0)]);
        let corpus = corpus(&[("u2", profile(&[("m1", 5.0), ("m2", 3.0), ("m3", 4.0)]))]);

        let result = recommender.recommend(&subject, &ids(&[]), &corpus).unwrap();

        assert_eq!(result.neighbor_id, "u2");
        assert!((result.similarity - 1.0).abs() < 1e-9);
        assert_eq!(result.recommendations, vec!["m3"]);
    }

    #[test]
    fn test_picks_most_similar() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 5.0), ("m2", 1.0)]);
        let corpus = corpus(&[
            ("far", profile(&[("m1", 1.0), ("m2", 5.0), ("m3", 5.0)])),
            ("near", profile(&[("m1", 5.0), ("m2", 1.5), ("m4", 4.0)])),
        ]);

        let result = recommender.recommend(&subject, &ids(&[]), &corpus).unwrap();

        assert_eq!(result.neighbor_id, "near");
        assert_eq!(result.recommendations, vec!["m4"]);
    }

    #[test]
    fn test_excluded_user_never_matched() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 5.0)]);
        let corpus = corpus(&[
            ("me", profile(&[("m1", 5.0), ("m2", 5.0)])),
            ("other", profile(&[("m1", 2.0), ("m3", 4.0)])),
        ]);

        let result = recommender.recommend(&subject, &ids(&["me"]), &corpus).unwrap();

        assert_eq!(result.neighbor_id, "other");
    }

    #[test]
    fn test_all_excluded_is_no_match() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 5.0)]);
        let corpus = corpus(&[("me", profile(&[("m1", 5.0), ("m2", 5.0)]))]);

        assert!(recommender.recommend(&subject, &ids(&["me"]), &corpus).is_none());
    }

    #[test]
    fn test_no_common_movies_is_no_match() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 4.0)]);
        let corpus = corpus(&[("u2", profile(&[("m5", 2.0)]))]);

        assert!(recommender.recommend(&subject, &ids(&[]), &corpus).is_none());
    }

    #[test]
    fn test_zero_magnitude_candidate_skipped() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 4.0), ("m2", 2.0)]);
        let corpus = corpus(&[
            ("a_zero", profile(&[("m1", 0.0), ("m2", 0.0), ("m3", 5.0)])),
            ("b_real", profile(&[("m1", 1.0), ("m4", 3.0)])),
        ]);

        let result = recommender.recommend(&subject, &ids(&[]), &corpus).unwrap();

        assert_eq!(result.neighbor_id, "b_real");
        assert!(!result.similarity.is_nan());
    }

    #[test]
    fn test_huge_ratings_keep_similarity_finite() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 1e200), ("m2", 1e200)]);
        let corpus = corpus(&[("u2", profile(&[("m1", 1e200), ("m2", 1e200), ("m3", 4.0)]))]);

        let result = recommender.recommend(&subject, &ids(&[]), &corpus).unwrap();

        assert_eq!(result.neighbor_id, "u2");
        assert!((-1.0..=1.0).contains(&result.similarity));
        assert!((result.similarity - 1.0).abs() < 1e-9);
        assert_eq!(result.recommendations, vec!["m3"]);
    }

    #[test]
    fn test_huge_ratings_do_not_displace_better_match() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 1e200), ("m2", 1.0)]);
        let corpus = corpus(&[
            ("a_aligned", profile(&[("m1", 5.0), ("m2", 0.0), ("m3", 4.0)])),
            ("b_huge", profile(&[("m1", 1e200), ("m2", 1e200), ("m4", 5.0)])),
        ]);

        let result = recommender.recommend(&subject, &ids(&[]), &corpus).unwrap();

        assert_eq!(result.neighbor_id, "a_aligned");
        assert!(!result.similarity.is_nan());
    }

    #[test]
    fn test_tiny_ratings_still_match() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 1e-200)]);
        let corpus = corpus(&[("u2", profile(&[("m1", 1e-200), ("m3", 4.0)]))]);

        let result = recommender.recommend(&subject, &ids(&[]), &corpus).unwrap();

        assert_eq!(result.neighbor_id, "u2");
        assert!((result.similarity - 1.0).abs() < 1e-9);
        assert_eq!(result.recommendations, vec!["m3"]);
    }

    #[test]
    fn test_tie_keeps_first_in_corpus_order() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 3.0)]);
        let corpus = corpus(&[
            ("b", profile(&[("m1", 4.0), ("m2", 5.0)])),
            ("a", profile(&[("m1", 2.0), ("m3", 5.0)])),
        ]);

        let result = recommender.recommend(&subject, &ids(&[]), &corpus).unwrap();

        assert_eq!(result.neighbor_id, "a");
    }

    #[test]
    fn test_negative_similarity_still_matches() {
        let recommender = Recommender::default();
        let subject = profile(&[("m1", 1.0), ("m2", 1.0)]);
        let corpus = corpus(&[("u2", profile(&[("m1", -1.0), ("m2", -1.0), ("m3", 2.0)]))]);

        let result = recommender.recommend(&subject, &ids(&[]), &corpus).unwrap();

        assert!((result.similarity + 1.0).abs() < 1e-9);
        assert_eq!(result.recommendations, vec!["m3"]);
    }

    #[test]
    fn test_policy_applied() {
        let recommender = Recommender::new(RecommendationPolicy {
            min_rating: Some(4.0),
            max_results: Some(1),
        });
        let subject = profile(&[("m1", 5.0)]);
        let corpus = corpus(&[(
            "u2",
            profile(&[("m1", 5.0), ("m2", 3.0), ("m3", 4.0), ("m4", 5.0)]),
        )]);

        let result = recommender.recommend(&subject, &ids(&[]), &corpus).unwrap();

        assert_eq!(result.recommendations, vec!["m4"]);
    }
}
