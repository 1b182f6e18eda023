// Core algorithm exports
pub mod aggregate;
pub mod filters;
pub mod matcher;
pub mod ranking;
pub mod similarity;

pub use aggregate::combine_ratings;
pub use filters::{is_eligible_neighbor, unseen_candidates};
pub use matcher::Recommender;
pub use ranking::rank_candidates;
pub use similarity::{cosine_similarity, profile_similarity};
