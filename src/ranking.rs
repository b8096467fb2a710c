//! # Doctor Ranking Engine
//! Two-tier recommendation policy:
//!
//! 1. Personalized: aggregate the doctors reviewed by the target's most
//!    similar users and rank them by (avg rating desc, avg polarity desc).
//! 2. Global fallback: when the target has no similarity data, rank doctors
//!    site-wide with threshold gates (avg rating strictly above 3, avg
//!    polarity at least 0) so the fallback never surfaces a poorly rated
//!    doctor.
//!
//! Empty similarity data is a valid branch, not an error; data-access
//! failures propagate untouched.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::config::RecommenderConfig;
use crate::error::{RecommendError, Result};
use crate::resolver::UserSimilarityResolver;
use crate::store::{DoctorAggregate, DoctorId, DoctorSummary, ReviewRecord, ReviewStore, UserId};

/// Outcome of the personalized tier alone.
#[derive(Debug, Clone, PartialEq)]
pub enum RankingOutcome {
    Ranked(Vec<DoctorId>),
    /// Target has no reviews; caller must take the global fallback path.
    FallbackRequired,
}

/// Final recommendation after the two-tier policy has been applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "doctors")]
pub enum Recommendation {
    Personalized(Vec<DoctorId>),
    Fallback(Vec<DoctorId>),
}

impl Recommendation {
    pub fn doctor_ids(&self) -> &[DoctorId] {
        match self {
            Self::Personalized(ids) | Self::Fallback(ids) => ids,
        }
    }
}

/// Rank the doctors appearing in `reviews` by average rating, breaking ties
/// by average polarity, both descending. Pure and deterministic: doctors
/// with fully equal aggregates keep first-seen order.
pub fn rank_reviewed_doctors(reviews: &[(UserId, ReviewRecord)], top_n: usize) -> Vec<DoctorId> {
    let mut order: Vec<DoctorId> = Vec::new();
    let mut sums: HashMap<DoctorId, (f64, f64, usize)> = HashMap::new();
    for (_, review) in reviews {
        let entry = sums.entry(review.doctor_id).or_insert_with(|| {
            order.push(review.doctor_id);
            (0.0, 0.0, 0)
        });
        entry.0 += review.rating as f64;
        entry.1 += review.polarity;
        entry.2 += 1;
    }

    let mut ranked: Vec<(DoctorId, f64, f64)> = order
        .into_iter()
        .map(|doctor_id| {
            let (rating_sum, polarity_sum, count) = sums[&doctor_id];
            (
                doctor_id,
                rating_sum / count as f64,
                polarity_sum / count as f64,
            )
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then(b.2.partial_cmp(&a.2).unwrap_or(Ordering::Equal))
    });
    ranked.truncate(top_n);
    ranked.into_iter().map(|(doctor_id, _, _)| doctor_id).collect()
}

pub struct DoctorRankingEngine {
    store: Arc<dyn ReviewStore>,
    resolver: UserSimilarityResolver,
    config: RecommenderConfig,
}

impl DoctorRankingEngine {
    pub fn new(store: Arc<dyn ReviewStore>, config: RecommenderConfig) -> Self {
        let resolver = UserSimilarityResolver::new(Arc::clone(&store));
        Self {
            store,
            resolver,
            config,
        }
    }

    pub fn with_defaults(store: Arc<dyn ReviewStore>) -> Self {
        Self::new(store, RecommenderConfig::default())
    }

    /// Personalized tier: rank up to `top_n` doctors from the reviews of the
    /// target's most similar users. Signals `FallbackRequired` when the
    /// target has no similarity data.
    pub async fn recommend_doctors(
        &self,
        target: UserId,
        top_n: usize,
    ) -> Result<RankingOutcome> {
        let similar = self
            .resolver
            .find_most_similar_users(target, self.config.top_similar_users)
            .await?;
        if similar.is_empty() {
            info!(user = target, "no similarity data, fallback required");
            return Ok(RankingOutcome::FallbackRequired);
        }

        let user_ids: Vec<UserId> = similar.iter().map(|s| s.user_id).collect();
        let reviews = self.store.reviews_by_users(&user_ids).await?;
        let ranked = rank_reviewed_doctors(&reviews, top_n);

        debug!(
            user = target,
            similar = user_ids.len(),
            reviews = reviews.len(),
            ranked = ranked.len(),
            "personalized ranking computed"
        );
        Ok(RankingOutcome::Ranked(ranked))
    }

    /// Global fallback: threshold-gated, store-ordered top doctors across all
    /// non-deleted reviews.
    pub async fn find_top_doctors_by_query(&self) -> Result<Vec<DoctorAggregate>> {
        let candidates = self
            .store
            .doctor_aggregate_candidates(
                self.config.fallback_min_avg_rating,
                self.config.fallback_min_avg_polarity,
                self.config.top_doctors,
            )
            .await?;
        Ok(candidates)
    }

    /// Full two-tier policy with configured list lengths.
    pub async fn recommend(&self, target: UserId) -> Result<Recommendation> {
        match self
            .recommend_doctors(target, self.config.top_doctors)
            .await?
        {
            RankingOutcome::Ranked(ids) => Ok(Recommendation::Personalized(ids)),
            RankingOutcome::FallbackRequired => {
                let ids = self
                    .find_top_doctors_by_query()
                    .await?
                    .into_iter()
                    .map(|a| a.doctor_id)
                    .collect();
                Ok(Recommendation::Fallback(ids))
            }
        }
    }

    /// Hydrate a ranked id list into doctor records, preserving rank order.
    /// A missing doctor is a `NotFound` error, never a silently shorter list.
    pub async fn hydrate(&self, ids: &[DoctorId]) -> Result<Vec<DoctorSummary>> {
        let found = self.store.doctors_by_ids(ids).await?;
        let mut by_id: HashMap<DoctorId, DoctorSummary> =
            found.into_iter().map(|d| (d.id, d)).collect();
        ids.iter()
            .map(|id| {
                by_id
                    .remove(id)
                    .ok_or_else(|| RecommendError::NotFound(format!("doctor {id}")))
            })
            .collect()
    }
}
