use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use validator::Validate;

use crate::core::combine_ratings;
use crate::error::RecommendError;
use crate::models::domain::{Corpus, RatingProfile};

/// Requester id(s): a single id or a list of ids
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequesterIds {
    One(String),
    Many(Vec<String>),
}

impl RequesterIds {
    pub fn to_vec(&self) -> Vec<String> {
        match self {
            RequesterIds::One(id) => vec![id.clone()],
            RequesterIds::Many(ids) => ids.clone(),
        }
    }
}

/// Requester ratings, either grouped per user or a single flat profile
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRatings {
    PerUser(Corpus),
    Flat(RatingProfile),
}

impl UserRatings {
    /// True when at least one requester has rated something
    pub fn has_ratings(&self) -> bool {
        match self {
            UserRatings::PerUser(profiles) => profiles.values().any(|p| !p.is_empty()),
            UserRatings::Flat(profile) => !profile.is_empty(),
        }
    }
}

/// Request to compute recommendations
///
/// POST /api/recommend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub user_id: Option<RequesterIds>,
    #[serde(default)]
    pub user_ratings: Option<UserRatings>,
    #[serde(default)]
    pub all_user_ratings: Option<Corpus>,
}

/// Inputs of one matching pass, ready for the recommender
#[derive(Debug, Clone, Validate)]
pub struct RecommendQuery {
    pub requester_ids: Vec<String>,
    pub exclude_ids: BTreeSet<String>,
    #[validate(length(min = 1))]
    pub subject: RatingProfile,
    #[validate(length(min = 1))]
    pub corpus: Corpus,
}

/// Outcome of resolving a request body
#[derive(Debug, Clone)]
pub enum Resolved {
    /// No requester has any rating; nothing to recommend
    Empty,
    Query(RecommendQuery),
}

impl RecommendRequest {
    /// Turn the payload into a matching query.
    ///
    /// Multiple per-user profiles are averaged into one subject. Requester ids
    /// come from `user_id` and from the keys of a per-user `user_ratings`.
    pub fn resolve(self) -> Result<Resolved, RecommendError> {
        let has_ratings = self
            .user_ratings
            .as_ref()
            .map(UserRatings::has_ratings)
            .unwrap_or(false);

        if !has_ratings {
            return Ok(Resolved::Empty);
        }

        let mut requester_ids = self
            .user_id
            .as_ref()
            .map(RequesterIds::to_vec)
            .unwrap_or_default();

        let subject = match self.user_ratings {
            Some(UserRatings::PerUser(profiles)) => {
                for id in profiles.keys() {
                    if !requester_ids.contains(id) {
                        requester_ids.push(id.clone());
                    }
                }
                combine_ratings(profiles.values())
            }
            Some(UserRatings::Flat(profile)) => profile,
            None => RatingProfile::new(),
        };

        let query = RecommendQuery {
            exclude_ids: requester_ids.iter().cloned().collect(),
            requester_ids,
            subject,
            corpus: self.all_user_ratings.unwrap_or_default(),
        };

        if let Err(errors) = query.validate() {
            tracing::debug!("Rejected recommend request: {}", errors);
            return Err(RecommendError::InvalidRequest(
                "Missing user_ratings or all_user_ratings".to_string(),
            ));
        }

        Ok(Resolved::Query(query))
    }
}
