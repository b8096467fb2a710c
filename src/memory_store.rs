//! # In-Memory Store
//! `ReviewStore` implementation backed by a `Mutex<Vec<_>>`. Stands in for
//! the real persistence layer in the demo binary and the integration tests;
//! honors the trait contract (soft deletes excluded, creation order
//! preserved, threshold/ordered fallback query).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::store::{
    DoctorAggregate, DoctorId, DoctorSummary, NewReview, ReviewRecord, ReviewStore, UserId,
};

#[derive(Debug, Clone)]
pub struct StoredReview {
    pub id: i64,
    pub author_user_id: UserId,
    pub doctor_id: DoctorId,
    pub rating: i32,
    pub text: String,
    pub polarity: f64,
    pub created_at: DateTime<Utc>,
    pub soft_deleted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default)]
struct Inner {
    reviews: Vec<StoredReview>,
    doctors: HashMap<DoctorId, DoctorSummary>,
    next_review_id: i64,
}

/// Thread-safe in-memory review/doctor store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_doctor(&self, doctor: DoctorSummary) {
        let mut inner = self.inner.lock().expect("memory store mutex poisoned");
        inner.doctors.insert(doctor.id, doctor);
    }

    /// Insert a review with an explicit polarity, bypassing the intake path.
    /// Returns the review id.
    pub fn insert_review(&self, review: NewReview) -> i64 {
        let mut inner = self.inner.lock().expect("memory store mutex poisoned");
        inner.next_review_id += 1;
        let id = inner.next_review_id;
        inner.reviews.push(StoredReview {
            id,
            author_user_id: review.author_user_id,
            doctor_id: review.doctor_id,
            rating: review.rating,
            text: review.text,
            polarity: review.polarity,
            created_at: Utc::now(),
            soft_deleted_at: None,
        });
        id
    }

    /// Mark a review as soft-deleted. Returns false when the id is unknown.
    pub fn soft_delete_review(&self, id: i64) -> bool {
        let mut inner = self.inner.lock().expect("memory store mutex poisoned");
        match inner.reviews.iter_mut().find(|r| r.id == id) {
            Some(r) => {
                r.soft_deleted_at = Some(Utc::now());
                true
            }
            None => false,
        }
    }

    pub fn review_count(&self) -> usize {
        let inner = self.inner.lock().expect("memory store mutex poisoned");
        inner.reviews.len()
    }
}

fn live<'a>(reviews: &'a [StoredReview]) -> impl Iterator<Item = &'a StoredReview> {
    reviews.iter().filter(|r| r.soft_deleted_at.is_none())
}

fn record(r: &StoredReview) -> ReviewRecord {
    ReviewRecord {
        doctor_id: r.doctor_id,
        rating: r.rating,
        polarity: r.polarity,
    }
}

#[async_trait]
impl ReviewStore for MemoryStore {
    async fn reviews_by_user(&self, user: UserId) -> anyhow::Result<Vec<ReviewRecord>> {
        let inner = self.inner.lock().expect("memory store mutex poisoned");
        Ok(live(&inner.reviews)
            .filter(|r| r.author_user_id == user)
            .map(record)
            .collect())
    }

    async fn reviews_by_users(
        &self,
        users: &[UserId],
    ) -> anyhow::Result<Vec<(UserId, ReviewRecord)>> {
        let inner = self.inner.lock().expect("memory store mutex poisoned");
        Ok(live(&inner.reviews)
            .filter(|r| users.contains(&r.author_user_id))
            .map(|r| (r.author_user_id, record(r)))
            .collect())
    }

    async fn reviews_excluding_user(
        &self,
        user: UserId,
    ) -> anyhow::Result<Vec<(UserId, ReviewRecord)>> {
        let inner = self.inner.lock().expect("memory store mutex poisoned");
        Ok(live(&inner.reviews)
            .filter(|r| r.author_user_id != user)
            .map(|r| (r.author_user_id, record(r)))
            .collect())
    }

    async fn doctor_aggregate_candidates(
        &self,
        min_avg_rating: f64,
        min_avg_polarity: f64,
        limit: usize,
    ) -> anyhow::Result<Vec<DoctorAggregate>> {
        let inner = self.inner.lock().expect("memory store mutex poisoned");

        // Group in first-review order so equal aggregates keep a stable order.
        let mut order: Vec<DoctorId> = Vec::new();
        let mut sums: HashMap<DoctorId, (f64, f64, usize)> = HashMap::new();
        for r in live(&inner.reviews) {
            let entry = sums.entry(r.doctor_id).or_insert_with(|| {
                order.push(r.doctor_id);
                (0.0, 0.0, 0)
            });
            entry.0 += r.rating as f64;
            entry.1 += r.polarity;
            entry.2 += 1;
        }

        let mut aggregates: Vec<DoctorAggregate> = order
            .into_iter()
            .map(|doctor_id| {
                let (rating_sum, polarity_sum, count) = sums[&doctor_id];
                DoctorAggregate {
                    doctor_id,
                    avg_rating: rating_sum / count as f64,
                    avg_polarity: polarity_sum / count as f64,
                    review_count: count,
                }
            })
            .filter(|a| a.avg_rating > min_avg_rating && a.avg_polarity >= min_avg_polarity)
            .collect();

        aggregates.sort_by(|a, b| {
            b.avg_rating
                .partial_cmp(&a.avg_rating)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(
                    b.avg_polarity
                        .partial_cmp(&a.avg_polarity)
                        .unwrap_or(std::cmp::Ordering::Equal),
                )
        });
        aggregates.truncate(limit);
        Ok(aggregates)
    }

    async fn save_review(&self, review: NewReview) -> anyhow::Result<()> {
        self.insert_review(review);
        Ok(())
    }

    async fn doctors_by_ids(&self, ids: &[DoctorId]) -> anyhow::Result<Vec<DoctorSummary>> {
        let inner = self.inner.lock().expect("memory store mutex poisoned");
        Ok(ids
            .iter()
            .filter_map(|id| inner.doctors.get(id).cloned())
            .collect())
    }
}
