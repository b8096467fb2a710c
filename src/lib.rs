// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod config;
pub mod error;
pub mod intake;
pub mod lexicon;
pub mod memory_store;
pub mod normalize;
pub mod ranking;
pub mod resolver;
pub mod sentiment;
pub mod similarity;
pub mod stemmer;
pub mod store;

// ---- Re-exports for stable public API ----
pub use crate::config::RecommenderConfig;
pub use crate::error::{RecommendError, Result};
pub use crate::intake::ReviewIntake;
pub use crate::lexicon::Lexicon;
pub use crate::memory_store::MemoryStore;
pub use crate::ranking::{DoctorRankingEngine, Recommendation, RankingOutcome};
pub use crate::resolver::{SimilarUser, UserSimilarityResolver};
pub use crate::sentiment::{SentimentAnalyzer, SentimentLabel};
pub use crate::store::{
    DoctorAggregate, DoctorId, DoctorSummary, NewReview, ReviewRecord, ReviewStore, UserId,
};
