//! # User Similarity Resolver
//! Builds rating vectors from review histories and finds the users whose
//! vectors point the same way as the target's.
//!
//! Similarity runs over explicit ratings only; review polarity enters later,
//! as the ranking tie-breaker. Vectors of different lengths are compared
//! over their common prefix (see `similarity`).

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::error::Result;
use crate::similarity::cosine_similarity;
use crate::store::{ReviewStore, UserId};

/// Ephemeral similarity result; computed on demand, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SimilarUser {
    pub user_id: UserId,
    pub similarity: f64,
}

pub struct UserSimilarityResolver {
    store: Arc<dyn ReviewStore>,
}

impl UserSimilarityResolver {
    pub fn new(store: Arc<dyn ReviewStore>) -> Self {
        Self { store }
    }

    /// Top `top_n` users most similar to `target`, descending by cosine
    /// similarity. Ties keep first-seen order (the sort is stable). An empty
    /// result means the target has no reviews and no personalization is
    /// possible — a valid outcome, not an error.
    pub async fn find_most_similar_users(
        &self,
        target: UserId,
        top_n: usize,
    ) -> Result<Vec<SimilarUser>> {
        let mine = self.store.reviews_by_user(target).await?;
        if mine.is_empty() {
            debug!(user = target, "no reviews for target user, no similarity data");
            return Ok(Vec::new());
        }
        let target_vector: Vec<f64> = mine.iter().map(|r| r.rating as f64).collect();

        let others = self.store.reviews_excluding_user(target).await?;

        // Group rating vectors per author, preserving first-seen user order
        // so equal similarities rank deterministically.
        let mut order: Vec<UserId> = Vec::new();
        let mut vectors: HashMap<UserId, Vec<f64>> = HashMap::new();
        for (author, review) in others {
            vectors
                .entry(author)
                .or_insert_with(|| {
                    order.push(author);
                    Vec::new()
                })
                .push(review.rating as f64);
        }

        let mut scored: Vec<SimilarUser> = order
            .into_iter()
            .map(|user_id| SimilarUser {
                user_id,
                similarity: cosine_similarity(&target_vector, &vectors[&user_id]),
            })
            .collect();

        scored.sort_by(|a, b| {
            b.similarity
                .partial_cmp(&a.similarity)
                .unwrap_or(Ordering::Equal)
        });
        scored.truncate(top_n);

        debug!(
            user = target,
            candidates = vectors.len(),
            kept = scored.len(),
            "resolved similar users"
        );
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_store::MemoryStore;
    use crate::store::NewReview;

    fn review(author: UserId, doctor: i64, rating: i32) -> NewReview {
        NewReview {
            author_user_id: author,
            doctor_id: doctor,
            rating,
            text: String::new(),
            polarity: 0.0,
        }
    }

    fn resolver(store: Arc<MemoryStore>) -> UserSimilarityResolver {
        UserSimilarityResolver::new(store)
    }

    #[tokio::test]
    async fn target_without_reviews_yields_empty() {
        let store = Arc::new(MemoryStore::new());
        store.insert_review(review(2, 10, 5));

        let got = resolver(store)
            .find_most_similar_users(1, crate::config::DEFAULT_TOP_SIMILAR_USERS)
            .await
            .unwrap();
        assert!(got.is_empty());
    }

    #[tokio::test]
    async fn most_similar_user_ranks_first() {
        let store = Arc::new(MemoryStore::new());
        // target
        store.insert_review(review(1, 10, 5));
        store.insert_review(review(1, 20, 4));
        // identical direction
        store.insert_review(review(2, 10, 5));
        store.insert_review(review(2, 30, 4));
        // weaker match
        store.insert_review(review(3, 40, 2));
        store.insert_review(review(3, 30, 5));

        let got = resolver(store).find_most_similar_users(1, 3).await.unwrap();
        let ids: Vec<UserId> = got.iter().map(|s| s.user_id).collect();
        assert_eq!(ids, vec![2, 3]);
        assert!((got[0].similarity - 1.0).abs() < 1e-12);
        assert!(got[1].similarity < got[0].similarity);
    }

    #[tokio::test]
    async fn top_n_truncates() {
        let store = Arc::new(MemoryStore::new());
        store.insert_review(review(1, 10, 4));
        for other in 2..=5 {
            store.insert_review(review(other, 10, 4));
        }

        let got = resolver(store).find_most_similar_users(1, 2).await.unwrap();
        assert_eq!(got.len(), 2);
    }

    #[tokio::test]
    async fn equal_similarity_keeps_first_seen_order() {
        let store = Arc::new(MemoryStore::new());
        store.insert_review(review(1, 10, 4));
        // Both others have a perfectly aligned one-review vector.
        store.insert_review(review(7, 10, 5));
        store.insert_review(review(4, 20, 3));

        let got = resolver(store).find_most_similar_users(1, 3).await.unwrap();
        let ids: Vec<UserId> = got.iter().map(|s| s.user_id).collect();
        assert_eq!(ids, vec![7, 4]);
    }

    #[tokio::test]
    async fn prefix_truncation_applies_to_longer_histories() {
        let store = Arc::new(MemoryStore::new());
        store.insert_review(review(1, 10, 5));
        // Other user has a longer history; only the first entry overlaps.
        store.insert_review(review(2, 10, 5));
        store.insert_review(review(2, 20, 1));
        store.insert_review(review(2, 30, 1));

        let got = resolver(store).find_most_similar_users(1, 3).await.unwrap();
        assert!((got[0].similarity - 1.0).abs() < 1e-12);
    }
}
