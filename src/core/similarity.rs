use crate::models::RatingProfile;

/// Cosine similarity of two equal-length vectors
///
/// Returns `None` when either vector has zero magnitude, since the angle is
/// undefined there. Each vector is divided by its largest absolute entry first
/// so squaring cannot overflow or underflow. The result is clamped to [-1, 1]
/// to absorb rounding.
#[inline]
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> Option<f64> {
    debug_assert_eq!(a.len(), b.len());

    let scale_a = max_abs(a)?;
    let scale_b = max_abs(b)?;

    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;

    for (x, y) in a.iter().zip(b) {
        let (x, y) = (x / scale_a, y / scale_b);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    let similarity = dot / (norm_a.sqrt() * norm_b.sqrt());
    if !similarity.is_finite() {
        return None;
    }

    Some(similarity.clamp(-1.0, 1.0))
}

/// Largest absolute entry, or `None` for an all-zero or non-finite vector
#[inline]
fn max_abs(v: &[f64]) -> Option<f64> {
    let max = v.iter().fold(0.0_f64, |max, x| max.max(x.abs()));
    (max > 0.0 && max.is_finite()).then_some(max)
}

/// Cosine similarity of two profiles over the movies both have rated
///
/// Returns `None` when the profiles share no movie or when either side's
/// ratings on the shared movies are all zero.
pub fn profile_similarity(subject: &RatingProfile, other: &RatingProfile) -> Option<f64> {
    // BTreeMap iteration is sorted, so both vectors line up by movie id
    let (u, o): (Vec<f64>, Vec<f64>) = subject
        .iter()
        .filter_map(|(movie_id, rating)| other.get(movie_id).map(|theirs| (*rating, *theirs)))
        .unzip();

    if u.is_empty() {
        return None;
    }

    cosine_similarity(&u, &o)
}
