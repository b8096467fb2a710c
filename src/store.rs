//! # Data Access Seam
//! Typed read/write interface the recommendation core consumes. The actual
//! persistence engine (SQL, HTTP service, in-memory fixture) lives behind
//! this trait; the core layers no retries or timeouts on top, so whatever
//! cancellation policy the store exposes flows straight through `.await`.
//!
//! Contract shared by every read: soft-deleted reviews are excluded, and
//! reviews come back in creation order (stable vectors make the math
//! reproducible).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type DoctorId = i64;

/// One review row as the recommendation math sees it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub doctor_id: DoctorId,
    /// Explicit star rating, domain-bounded 1–5.
    pub rating: i32,
    /// Polarity computed once at review creation; never recomputed.
    pub polarity: f64,
}

/// Hydrated doctor record for presenting a ranked id list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorSummary {
    pub id: DoctorId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

/// Per-doctor aggregate over non-deleted reviews. Derived, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoctorAggregate {
    pub doctor_id: DoctorId,
    pub avg_rating: f64,
    pub avg_polarity: f64,
    pub review_count: usize,
}

/// Payload for the single write the core triggers. The polarity score is
/// already computed when this is handed to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReview {
    pub author_user_id: UserId,
    pub doctor_id: DoctorId,
    pub rating: i32,
    pub text: String,
    pub polarity: f64,
}

/// Data-access collaborator. Failures are returned as-is; the core neither
/// wraps nor retries them.
#[async_trait]
pub trait ReviewStore: Send + Sync {
    /// Non-deleted reviews authored by `user`, in creation order.
    async fn reviews_by_user(&self, user: UserId) -> anyhow::Result<Vec<ReviewRecord>>;

    /// Batch form: non-deleted reviews authored by any of `users`, in
    /// creation order, tagged with their author.
    async fn reviews_by_users(
        &self,
        users: &[UserId],
    ) -> anyhow::Result<Vec<(UserId, ReviewRecord)>>;

    /// Non-deleted reviews authored by everyone except `user`, in creation
    /// order, tagged with their author.
    async fn reviews_excluding_user(
        &self,
        user: UserId,
    ) -> anyhow::Result<Vec<(UserId, ReviewRecord)>>;

    /// Global fallback query: doctors whose aggregate rating is strictly
    /// greater than `min_avg_rating` and aggregate polarity at least
    /// `min_avg_polarity`, ordered by (avg rating desc, avg polarity desc),
    /// limited to `limit`.
    async fn doctor_aggregate_candidates(
        &self,
        min_avg_rating: f64,
        min_avg_polarity: f64,
        limit: usize,
    ) -> anyhow::Result<Vec<DoctorAggregate>>;

    /// Persist a new review (the only write this core performs).
    async fn save_review(&self, review: NewReview) -> anyhow::Result<()>;

    /// Hydrate doctors for the given ids; unknown ids are simply absent from
    /// the result (callers decide whether that is an error).
    async fn doctors_by_ids(&self, ids: &[DoctorId]) -> anyhow::Result<Vec<DoctorSummary>>;
}
