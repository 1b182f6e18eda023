use crate::models::RatingProfile;
use std::collections::BTreeMap;

/// Collapse several rating profiles into one group profile
///
/// Each movie gets the arithmetic mean of every rating it received across
/// the supplied profiles. A movie rated by a single user keeps that rating.
/// No profiles means an empty result.
pub fn combine_ratings<'a, I>(profiles: I) -> RatingProfile
where
    I: IntoIterator<Item = &'a RatingProfile>,
{
    // movie -> (sum, count)
    let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for profile in profiles {
        for (movie_id, rating) in profile {
            let entry = totals.entry(movie_id.as_str()).or_insert((0.0, 0));
            entry.0 += rating;
            entry.1 += 1;
        }
    }

    totals
        .into_iter()
        .map(|(movie_id, (sum, count))| (movie_id.to_string(), sum / count as f64))
        .collect()
}
